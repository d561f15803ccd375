//! Age-appropriateness screening for text going to and coming from the helper.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::riddle_engine::models::SafetyVerdict;

/// What the player sees instead of a blocked message or reply.
pub const SAFE_REDIRECT: &str =
    "Let’s keep things kind and fun! Try asking about the riddle instead. 🌈";

#[async_trait]
pub trait SafetyScreen: Send + Sync {
    async fn screen(&self, text: &str) -> Result<SafetyVerdict>;
    fn name(&self) -> &str;
}

const DEFAULT_BLOCKLIST: &[&str] = &[
    "kill", "killing", "murder", "blood", "bloody", "gun", "guns", "weapon",
    "stupid", "idiot", "dumb", "hate", "shut", "loser", "ugly",
    "drugs", "beer", "wine", "drunk", "damn", "hell", "sexy",
];

/// Offline screen: unsafe when any blocked word appears as a whole word.
#[derive(Debug, Clone)]
pub struct KeywordScreen {
    blocked: HashSet<String>,
}

impl Default for KeywordScreen {
    fn default() -> Self {
        Self::with_words(DEFAULT_BLOCKLIST.iter().copied())
    }
}

impl KeywordScreen {
    pub fn with_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        KeywordScreen {
            blocked: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
        }
    }

    /// First blocked word in `text`, if any.
    pub fn find_blocked(&self, text: &str) -> Option<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric() && c != '\'')
            .map(|w| w.trim_matches('\''))
            .find(|w| self.blocked.contains(*w))
            .map(str::to_string)
    }

    pub fn verdict(&self, text: &str) -> SafetyVerdict {
        match self.find_blocked(text) {
            Some(word) => SafetyVerdict::Unsafe { reason: format!("blocked word \"{word}\"") },
            None => SafetyVerdict::Safe,
        }
    }
}

#[async_trait]
impl SafetyScreen for KeywordScreen {
    async fn screen(&self, text: &str) -> Result<SafetyVerdict> {
        Ok(self.verdict(text))
    }

    fn name(&self) -> &str {
        "keyword"
    }
}
