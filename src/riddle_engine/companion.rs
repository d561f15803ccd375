//! The chat helper the player talks to.
//!
//! [`Companion`] is the seam between the game and whatever produces replies:
//! [`RuleBasedCompanion`] answers offline from keyword rules, while
//! `hosted::HostedCompanion` forwards prompts to an inference endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::riddle_engine::models::{Language, Persona, Riddle};

/// Riddle text used when the player has not drawn one yet.
pub const NO_RIDDLE: &str = "No riddle selected";

/// Everything a companion needs to produce one reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatPrompt {
    pub message: String,
    pub riddle: Option<String>,
    /// Prior turns formatted as `"User: ..."` / `"AI: ..."`.
    pub history: Vec<String>,
    pub persona: Persona,
}

impl ChatPrompt {
    pub fn riddle_text(&self) -> &str {
        self.riddle.as_deref().unwrap_or(NO_RIDDLE)
    }
}

#[async_trait]
pub trait Companion: Send + Sync {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String>;
    async fn translate(&self, riddle: &Riddle, language: Language) -> Result<Riddle>;
    fn name(&self) -> &str;
}

/// Keyword buckets checked in order; the first hit picks the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Hint,
    Question,
    Praise,
    Game,
    Guess,
}

const RULES: [(Intent, &[&str]); 4] = [
    (Intent::Hint,     &["hint", "help", "clue"]),
    (Intent::Question, &["why", "what", "how"]),
    (Intent::Praise,   &["good", "great", "awesome"]),
    (Intent::Game,     &["riddle", "game", "fun"]),
];

/// Classify a message by substring match ("funny" counts as "fun").
pub fn classify_intent(message: &str) -> Intent {
    let lower = message.trim().to_lowercase();
    RULES
        .iter()
        .find(|(_, words)| words.iter().any(|w| lower.contains(*w)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Guess)
}

/// Offline companion: canned replies keyed on [`Intent`]. Never fails.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedCompanion;

impl RuleBasedCompanion {
    pub fn respond(prompt: &ChatPrompt) -> String {
        let riddle = prompt.riddle_text();
        let emoji = prompt.persona.emoji();
        match classify_intent(&prompt.message) {
            Intent::Hint =>
                format!("Think about the key words in the riddle: {riddle}! {emoji}"),
            Intent::Question =>
                format!("That’s a great question! Focus on the clues in: {riddle}! {emoji}"),
            Intent::Praise =>
                format!("You’re a riddle superstar! Keep it up! {emoji}"),
            Intent::Game =>
                format!("This riddle game is a blast! Try guessing: {riddle}! {emoji}"),
            Intent::Guess =>
                format!("Let’s keep puzzling! What’s your next guess for: {riddle}? {emoji}"),
        }
    }
}

#[async_trait]
impl Companion for RuleBasedCompanion {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String> {
        Ok(Self::respond(prompt))
    }

    // No offline translation tables; the riddle is served as written.
    async fn translate(&self, riddle: &Riddle, _language: Language) -> Result<Riddle> {
        Ok(riddle.clone())
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prompt(message: &str, riddle: Option<&str>) -> ChatPrompt {
        ChatPrompt {
            message: message.to_string(),
            riddle: riddle.map(str::to_string),
            history: Vec::new(),
            persona: Persona::PuzzlePal,
        }
    }

    #[test]
    fn first_matching_bucket_wins() {
        // "help" (Hint) beats "what" (Question)
        assert_eq!(classify_intent("What is this, help!"), Intent::Hint);
        assert_eq!(classify_intent("how does it work"), Intent::Question);
        assert_eq!(classify_intent("AWESOME"), Intent::Praise);
        assert_eq!(classify_intent("so funny"), Intent::Game);
        assert_eq!(classify_intent("a clock?"), Intent::Guess);
    }

    #[test]
    fn substring_matching_is_loose() {
        // "somewhat" contains "what"
        assert_eq!(classify_intent("somewhat"), Intent::Question);
    }

    #[test]
    fn reply_mentions_riddle_and_persona() {
        let p = prompt("give me a clue", Some("What has hands but can’t clap?"));
        assert_eq!(
            RuleBasedCompanion::respond(&p),
            "Think about the key words in the riddle: What has hands but can’t clap?! 😄"
        );
    }

    #[test]
    fn missing_riddle_uses_placeholder() {
        let p = prompt("banana", None);
        assert_eq!(
            RuleBasedCompanion::respond(&p),
            "Let’s keep puzzling! What’s your next guess for: No riddle selected? 😄"
        );
    }

    #[tokio::test]
    async fn offline_translation_is_identity() {
        let r = Riddle::new("What has keys but can’t open locks?", "a piano");
        let out = RuleBasedCompanion.translate(&r, Language::French).await.unwrap();
        assert_eq!(out, r);
    }
}
