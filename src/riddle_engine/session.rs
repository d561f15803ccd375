//! One player's game: current riddle, score, language and chat history.
//!
//! Every player-facing action is a method here; the CLI and the web handlers
//! only translate input into these calls.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::config::{AppConfig, BackendKind};
use crate::error::{Result, RiddleError};
use crate::riddle_engine::{
    companion::{ChatPrompt, Companion, RuleBasedCompanion},
    evaluator, generator,
    hosted::{HostedCompanion, HostedSafetyScreen, InferenceClient},
    models::{AnswerOutcome, Language, Level, Persona, Progress, RiddleCard, SafetyVerdict, SoundCue},
    pool::RiddlePool,
    safety::{KeywordScreen, SafetyScreen, SAFE_REDIRECT},
};

pub const CORRECT_MESSAGE: &str = "🎉 That's correct! Great job!";
pub const WRONG_MESSAGE: &str = "❌ Hmm... that's not quite right. Want a hint?";
pub const EMPTY_RIDDLE_PROMPT: &str = "Please type a riddle first!";
pub const EMPTY_MESSAGE_PROMPT: &str = "Please type a message first!";

/// The collaborators a session talks to.
#[derive(Clone)]
pub struct Backends {
    pub companion: Arc<dyn Companion>,
    pub safety: Arc<dyn SafetyScreen>,
}

impl Backends {
    /// Offline pair: keyword rules and a keyword screen.
    pub fn local() -> Self {
        Backends {
            companion: Arc::new(RuleBasedCompanion),
            safety: Arc::new(KeywordScreen::default()),
        }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let settings = &config.backend;
        match settings.kind {
            BackendKind::Local => Ok(Self::local()),
            BackendKind::Hosted => {
                let token = settings.token().ok_or_else(|| {
                    RiddleError::config(format!(
                        "hosted backend needs an API token in ${}",
                        settings.token_env
                    ))
                })?;
                let client = InferenceClient::from_settings(settings, token)?;
                tracing::info!(
                    chat_model = %settings.chat_model,
                    safety_model = %settings.safety_model,
                    "using hosted inference backend"
                );
                Ok(Backends {
                    companion: Arc::new(HostedCompanion::new(client.clone(), settings)),
                    safety: Arc::new(HostedSafetyScreen::new(client, settings)),
                })
            }
        }
    }
}

/// Knobs a session is created with.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub pool_preload: usize,
    pub pool_reuse_chance: f64,
    pub language: Language,
    pub rng_seed: Option<u64>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            pool_preload: 3,
            pool_reuse_chance: 0.5,
            language: Language::English,
            rng_seed: None,
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(SessionSettings {
            pool_preload: config.game.pool_preload,
            pool_reuse_chance: config.game.pool_reuse_chance,
            language: config.game.language()?,
            rng_seed: config.game.rng_seed,
        })
    }
}

pub struct GameSession {
    rng: StdRng,
    pool: RiddlePool,
    reuse_chance: f64,
    riddle: Option<RiddleCard>,
    score: u32,
    attempts: u32,
    language: Language,
    history: Vec<String>,
    last_outcome: Option<AnswerOutcome>,
}

impl GameSession {
    pub fn new(settings: SessionSettings) -> Self {
        let mut rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let pool = RiddlePool::preloaded(&mut rng, settings.pool_preload);
        GameSession {
            rng,
            pool,
            reuse_chance: settings.pool_reuse_chance,
            riddle: None,
            score: 0,
            attempts: 0,
            language: settings.language,
            history: Vec::new(),
            last_outcome: None,
        }
    }

    // ── accessors ───────────────────────────────────────────────────────────

    pub fn current_riddle(&self) -> Option<&RiddleCard> {
        self.riddle.as_ref()
    }

    pub fn progress(&self) -> Progress {
        Progress { score: self.score, attempts: self.attempts }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn pool(&self) -> &RiddlePool {
        &self.pool
    }

    // ── solve mode ──────────────────────────────────────────────────────────

    /// Draw the next riddle for `level`, translated into the session language
    /// when possible. Clears the last outcome and the chat history.
    pub async fn new_riddle(&mut self, level: Level, backends: &Backends) -> Result<&RiddleCard> {
        let drawn = self.pool.draw(&mut self.rng, level, self.reuse_chance);

        let (riddle, language) = if self.language == Language::English {
            (drawn, Language::English)
        } else {
            match backends.companion.translate(&drawn, self.language).await {
                Ok(translated) if translated == drawn => {
                    tracing::debug!(language = %self.language, "companion left riddle untranslated");
                    (drawn, Language::English)
                }
                Ok(translated) => (translated, self.language),
                Err(e) => {
                    tracing::warn!(language = %self.language, error = %e, "translation failed, serving riddle untranslated");
                    (drawn, Language::English)
                }
            }
        };

        let card = generator::card(&mut self.rng, level, language, riddle);
        tracing::debug!(riddle_id = %card.riddle_id, %level, "new riddle");

        self.last_outcome = None;
        self.history.clear();
        Ok(self.riddle.insert(card))
    }

    pub fn submit_answer(&mut self, answer: &str) -> Result<AnswerOutcome> {
        let card = self.riddle.as_ref().ok_or(RiddleError::NoActiveRiddle)?;
        let is_correct = evaluator::evaluate_answer(answer, &card.riddle.answer);

        self.attempts += 1;
        let (message, sound) = if is_correct {
            self.score += 1;
            (CORRECT_MESSAGE, SoundCue::Success)
        } else {
            (WRONG_MESSAGE, SoundCue::Failure)
        };
        tracing::debug!(riddle_id = %card.riddle_id, is_correct, "answer submitted");

        let outcome = AnswerOutcome {
            is_correct,
            message: message.to_string(),
            sound,
            score: self.score,
            attempts: self.attempts,
        };
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    pub fn hint(&self) -> Result<String> {
        let card = self.riddle.as_ref().ok_or(RiddleError::NoActiveRiddle)?;
        Ok(format!("🧠 Hint: {}", evaluator::hint_for(&card.riddle)))
    }

    /// Ask the helper about the current riddle, passing whatever the player
    /// has typed so far. The exchange is not recorded in the history.
    pub async fn ask_for_help(&mut self, typed: &str, backends: &Backends) -> Result<String> {
        self.screened_reply(typed, backends).await
    }

    // ── stump mode ──────────────────────────────────────────────────────────

    pub async fn stump(&mut self, custom_riddle: &str, backends: &Backends) -> Result<String> {
        if custom_riddle.trim().is_empty() {
            return Err(RiddleError::EmptyInput(EMPTY_RIDDLE_PROMPT));
        }
        self.screened_reply(custom_riddle, backends).await
    }

    // ── chat mode ───────────────────────────────────────────────────────────

    /// Send a chat message and return the whole conversation.
    pub async fn chat(&mut self, message: &str, backends: &Backends) -> Result<&[String]> {
        if message.trim().is_empty() {
            return Err(RiddleError::EmptyInput(EMPTY_MESSAGE_PROMPT));
        }
        if let SafetyVerdict::Unsafe { reason } = backends.safety.screen(message).await? {
            tracing::info!(%reason, "chat message blocked");
            return Err(RiddleError::Blocked(SAFE_REDIRECT));
        }

        // The prompt carries earlier turns only; the new message goes in `message`.
        let prompt = self.prompt_for(message);
        let reply = backends.companion.reply(&prompt).await?;
        let reply = self.screen_output(reply, backends).await?;
        self.history.push(format!("User: {message}"));
        self.history.push(format!("AI: {reply}"));
        Ok(&self.history)
    }

    // ── sidebar ─────────────────────────────────────────────────────────────

    /// Zero the scoreboard and forget the conversation. The current riddle
    /// and the pool survive.
    pub fn reset_progress(&mut self) {
        self.score = 0;
        self.attempts = 0;
        self.history.clear();
        tracing::debug!("progress reset");
    }

    // ── internals ───────────────────────────────────────────────────────────

    fn prompt_for(&mut self, message: &str) -> ChatPrompt {
        let persona = Persona::ALL
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(Persona::RiddleWizard);
        ChatPrompt {
            message: message.to_string(),
            riddle: self.riddle.as_ref().map(|c| c.riddle.question.clone()),
            history: self.history.clone(),
            persona,
        }
    }

    async fn screened_reply(&mut self, text: &str, backends: &Backends) -> Result<String> {
        if let SafetyVerdict::Unsafe { reason } = backends.safety.screen(text).await? {
            tracing::info!(%reason, "helper input blocked");
            return Ok(SAFE_REDIRECT.to_string());
        }
        let prompt = self.prompt_for(text);
        let reply = backends.companion.reply(&prompt).await?;
        self.screen_output(reply, backends).await
    }

    async fn screen_output(&self, reply: String, backends: &Backends) -> Result<String> {
        match backends.safety.screen(&reply).await? {
            SafetyVerdict::Safe => Ok(reply),
            SafetyVerdict::Unsafe { reason } => {
                tracing::warn!(%reason, "helper reply replaced");
                Ok(SAFE_REDIRECT.to_string())
            }
        }
    }
}
