//! TOML configuration with defaults for every field.
//!
//! ```toml
//! [game]
//! pool_preload = 3
//! pool_reuse_chance = 0.5
//! default_language = "es"
//!
//! [server]
//! bind = "0.0.0.0:8501"
//!
//! [backend]
//! kind = "hosted"
//! chat_model = "mistralai/Mistral-7B-Instruct-v0.3"
//! token_env = "HF_API_TOKEN"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RiddleError};
use crate::riddle_engine::models::Language;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameSettings,
    pub server: ServerSettings,
    pub backend: BackendSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    /// Riddles drawn into each level's pool when a session starts.
    pub pool_preload: usize,
    /// Probability that "new riddle" re-serves a pooled one.
    pub pool_reuse_chance: f64,
    /// Language code or name.
    pub default_language: String,
    pub rng_seed: Option<u64>,
}

impl Default for GameSettings {
    fn default() -> Self {
        GameSettings {
            pool_preload: 3,
            pool_reuse_chance: 0.5,
            default_language: "en".to_string(),
            rng_seed: None,
        }
    }
}

impl GameSettings {
    pub fn language(&self) -> Result<Language> {
        self.default_language.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
    pub max_sessions: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            bind: "127.0.0.1:8501".to_string(),
            max_sessions: 1000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Local,
    Hosted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub kind: BackendKind,
    pub endpoint: String,
    pub chat_model: String,
    pub safety_model: String,
    /// Name of the environment variable holding the API token.
    pub token_env: String,
    pub timeout_seconds: u64,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub unsafe_labels: Vec<String>,
    pub unsafe_threshold: f32,
}

impl Default for BackendSettings {
    fn default() -> Self {
        BackendSettings {
            kind: BackendKind::Local,
            endpoint: "https://api-inference.huggingface.co".to_string(),
            chat_model: "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
            safety_model: "unitary/toxic-bert".to_string(),
            token_env: "HF_API_TOKEN".to_string(),
            timeout_seconds: 30,
            max_new_tokens: 120,
            temperature: 0.7,
            unsafe_labels: ["toxic", "severe_toxic", "obscene", "threat", "insult", "identity_hate"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            unsafe_threshold: 0.5,
        }
    }
}

impl BackendSettings {
    /// Token from the configured environment variable; blank counts as unset.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        tracing::debug!("Loaded config from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    /// File config when a path is given, defaults otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let reuse = self.game.pool_reuse_chance;
        if !(0.0..=1.0).contains(&reuse) {
            return Err(RiddleError::config(format!(
                "game.pool_reuse_chance must be between 0 and 1 (got {reuse})"
            )));
        }
        self.game.language()?;

        if self.server.max_sessions == 0 {
            return Err(RiddleError::config("server.max_sessions must be at least 1"));
        }
        if self.server.bind.trim().is_empty() {
            return Err(RiddleError::config("server.bind cannot be empty"));
        }

        let backend = &self.backend;
        if backend.kind == BackendKind::Hosted {
            if !backend.endpoint.starts_with("http://") && !backend.endpoint.starts_with("https://") {
                return Err(RiddleError::config(format!(
                    "backend.endpoint must be an http(s) URL (got {})",
                    backend.endpoint
                )));
            }
            if backend.chat_model.is_empty() || backend.safety_model.is_empty() {
                return Err(RiddleError::config("backend models cannot be empty"));
            }
            if backend.timeout_seconds == 0 {
                return Err(RiddleError::config("backend.timeout_seconds must be at least 1"));
            }
        }
        if !(0.0..=1.0).contains(&backend.unsafe_threshold) {
            return Err(RiddleError::config(format!(
                "backend.unsafe_threshold must be between 0 and 1 (got {})",
                backend.unsafe_threshold
            )));
        }
        Ok(())
    }
}
