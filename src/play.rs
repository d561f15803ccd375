//! Line-oriented terminal game.
//!
//! Plain text answers the current riddle; lines starting with `/` are
//! commands. [`PlayLoop::handle_line`] returns the lines to print, so the
//! whole game can be driven without a terminal.

use std::str::FromStr;

use crate::error::{Result, RiddleError};
use crate::riddle_engine::{Backends, GameSession, Language, Level, Mode};

pub const RULES: &str = "\
📜 Rules
  - Solve riddles or chat with the AI.
  - One answer per try.
  - Ask for hints or talk to the AI if stuck.

🕹️ How to play
  /new [level]      new riddle (easy, medium, hard)
  /level <level>    change difficulty
  /lang <language>  change language (en, es, fr, de, it, pt, hi, th)
  /hint             get a hint
  /ask [text]       ask the AI for help with the riddle
  /stump <riddle>   stump the AI with your own riddle
  /chat <message>   chat with the AI
  /score            show your progress
  /reset            reset your progress
  /rules            show this help
  /quit             leave the game
  anything else     your answer to the riddle";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NewRiddle(Option<Level>),
    SetLevel(Level),
    SetLanguage(Language),
    Hint,
    Ask(String),
    Stump(String),
    Chat(String),
    Score,
    Reset,
    Rules,
    Quit,
    Answer(String),
}

impl FromStr for Command {
    type Err = RiddleError;

    fn from_str(line: &str) -> Result<Self> {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Ok(Command::Answer(line.to_string()));
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        Ok(match name.to_lowercase().as_str() {
            "new" if arg.is_empty() => Command::NewRiddle(None),
            "new"   => Command::NewRiddle(Some(arg.parse()?)),
            "level" => Command::SetLevel(arg.parse()?),
            "lang" | "language" => Command::SetLanguage(arg.parse()?),
            "hint"  => Command::Hint,
            "ask"   => Command::Ask(arg.to_string()),
            "stump" => Command::Stump(arg.to_string()),
            "chat"  => Command::Chat(arg.to_string()),
            "score" => Command::Score,
            "reset" => Command::Reset,
            "rules" | "help" => Command::Rules,
            "quit" | "exit" => Command::Quit,
            _ => Command::Rules,
        })
    }
}

impl Command {
    pub fn mode(&self) -> Mode {
        match self {
            Command::Stump(_) => Mode::Stump,
            Command::Chat(_)  => Mode::Chat,
            _ => Mode::Solve,
        }
    }
}

/// What the front end should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Continue(Vec<String>),
    Quit(Vec<String>),
}

pub struct PlayLoop {
    session: GameSession,
    backends: Backends,
    level: Level,
    last_answer: String,
}

impl PlayLoop {
    pub fn new(session: GameSession, backends: Backends, level: Level) -> Self {
        PlayLoop { session, backends, level, last_answer: String::new() }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn welcome(&self) -> Vec<String> {
        vec![
            "🧠 Avery's Riddle Me This?".to_string(),
            "Welcome! Solve riddles, chat with the AI, and have fun! 🎉".to_string(),
            format!(
                "Level: {}  Language: {}  (type /rules for help, /new for a riddle)",
                self.level,
                self.session.language()
            ),
        ]
    }

    /// Handle one input line. Player-facing errors, backend errors included,
    /// become output lines; only config and I/O failures are returned as `Err`.
    pub async fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue(Vec::new()));
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => return Ok(Flow::Continue(vec![e.user_message()])),
        };
        tracing::debug!(?command, mode = %command.mode(), "command");
        if command == Command::Quit {
            return Ok(Flow::Quit(vec![
                format!("Thanks for playing! Final {}", self.session.progress()),
            ]));
        }
        match self.run(command).await {
            Ok(lines) => Ok(Flow::Continue(lines)),
            Err(e @ (RiddleError::Config { .. } | RiddleError::Io(_))) => Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "command failed");
                Ok(Flow::Continue(vec![e.user_message()]))
            }
        }
    }

    async fn run(&mut self, command: Command) -> Result<Vec<String>> {
        let out = match command {
            Command::NewRiddle(level) => {
                if let Some(level) = level {
                    self.level = level;
                }
                self.last_answer.clear();
                let card = self.session.new_riddle(self.level, &self.backends).await?;
                vec![
                    format!("🧩 Riddle ({}):", card.level),
                    card.riddle.question.clone(),
                ]
            }
            Command::SetLevel(level) => {
                self.level = level;
                vec![format!("Difficulty set to {level}. Type /new for a riddle.")]
            }
            Command::SetLanguage(language) => {
                self.session.set_language(language);
                vec![format!("🌐 Language set to {language}.")]
            }
            Command::Hint => vec![self.session.hint()?],
            Command::Ask(text) => {
                let typed = if text.is_empty() { self.last_answer.clone() } else { text };
                let reply = self.session.ask_for_help(&typed, &self.backends).await?;
                vec![format!("AI says: {reply}")]
            }
            Command::Stump(riddle) => {
                let reply = self.session.stump(&riddle, &self.backends).await?;
                vec![format!("AI thinks: {reply}")]
            }
            Command::Chat(message) => {
                let history = self.session.chat(&message, &self.backends).await?;
                history.to_vec()
            }
            Command::Score => vec![format!("📈 {}", self.session.progress())],
            Command::Reset => {
                self.session.reset_progress();
                vec!["Progress reset!".to_string()]
            }
            Command::Rules => RULES.lines().map(str::to_string).collect(),
            Command::Quit => Vec::new(),
            Command::Answer(answer) => {
                self.last_answer = answer.clone();
                let outcome = self.session.submit_answer(&answer)?;
                let mut lines = vec![outcome.message];
                if outcome.is_correct {
                    lines.push("🎈🎈🎈".to_string());
                }
                lines.push(format!("📈 {}", self.session.progress()));
                lines
            }
        };
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::riddle_engine::SessionSettings;

    fn play_loop() -> PlayLoop {
        let session = GameSession::new(SessionSettings { rng_seed: Some(21), ..SessionSettings::default() });
        PlayLoop::new(session, Backends::local(), Level::Easy)
    }

    fn lines(flow: Flow) -> Vec<String> {
        match flow {
            Flow::Continue(lines) | Flow::Quit(lines) => lines,
        }
    }

    #[test]
    fn parses_commands_and_answers() {
        assert_eq!("/new".parse::<Command>().unwrap(), Command::NewRiddle(None));
        assert_eq!("/new hard".parse::<Command>().unwrap(), Command::NewRiddle(Some(Level::Hard)));
        assert_eq!("/lang es".parse::<Command>().unwrap(), Command::SetLanguage(Language::Spanish));
        assert_eq!("/chat  hi there ".parse::<Command>().unwrap(), Command::Chat("hi there".into()));
        assert_eq!("  a towel ".parse::<Command>().unwrap(), Command::Answer("a towel".into()));
        assert!("/level impossible".parse::<Command>().is_err());
    }

    #[tokio::test]
    async fn answering_before_a_riddle_prompts_for_one() {
        let mut game = play_loop();
        let out = lines(game.handle_line("a clock").await.unwrap());
        assert_eq!(out, vec!["Pick a new riddle first! 🎲".to_string()]);
    }

    #[tokio::test]
    async fn full_round_scores_a_point() {
        let mut game = play_loop();
        let out = lines(game.handle_line("/new medium").await.unwrap());
        assert_eq!(out[0], "🧩 Riddle (Medium):");
        assert_eq!(game.level(), Level::Medium);

        let answer = game.session().current_riddle().unwrap().riddle.answer.clone();
        let out = lines(game.handle_line(&answer).await.unwrap());
        assert_eq!(out[0], "🎉 That's correct! Great job!");
        assert_eq!(out.last().unwrap(), "📈 Score: 1 / 1");
    }

    #[tokio::test]
    async fn quit_reports_final_score() {
        let mut game = play_loop();
        match game.handle_line("/quit").await.unwrap() {
            Flow::Quit(lines) => assert_eq!(lines, vec!["Thanks for playing! Final Score: 0 / 0".to_string()]),
            other => panic!("expected quit, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_stump_shows_prompt() {
        let mut game = play_loop();
        let out = lines(game.handle_line("/stump").await.unwrap());
        assert_eq!(out, vec!["Please type a riddle first!".to_string()]);
    }
}
