use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiddleError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Config file parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("API error [{status}]: {message}")]
    Api { status: u16, message: String },

    #[error("Translation failed: {0}")]
    Translation(String),

    #[error("Unknown level: {0}")]
    UnknownLevel(String),

    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("No riddle selected")]
    NoActiveRiddle,

    #[error("Empty input: {0}")]
    EmptyInput(&'static str),

    #[error("Blocked by safety screen")]
    Blocked(&'static str),

    #[error("Session not found: {0}")]
    SessionNotFound(String),
}

impl RiddleError {
    pub fn config(message: impl Into<String>) -> Self {
        RiddleError::Config { message: message.into() }
    }

    /// Short line suitable for showing a young player.
    pub fn user_message(&self) -> String {
        match self {
            RiddleError::Http(_) | RiddleError::Api { .. } | RiddleError::Serde(_) => {
                "The riddle helper had an API error. Please try again in a moment.".to_string()
            }
            RiddleError::Translation(_) => {
                "We couldn't translate that riddle, so here it is in English.".to_string()
            }
            RiddleError::UnknownLevel(level) => {
                format!("\"{level}\" isn't a level. Pick Easy, Medium or Hard.")
            }
            RiddleError::UnknownLanguage(lang) => {
                format!("\"{lang}\" isn't a language we speak yet.")
            }
            RiddleError::NoActiveRiddle => "Pick a new riddle first! 🎲".to_string(),
            RiddleError::EmptyInput(prompt) | RiddleError::Blocked(prompt) => prompt.to_string(),
            RiddleError::SessionNotFound(_) => {
                "Your game has expired. Start a new one!".to_string()
            }
            RiddleError::Config { .. } | RiddleError::Toml(_) | RiddleError::Io(_) => {
                "The game isn't set up correctly. Ask a grown-up to check the settings.".to_string()
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, RiddleError>;
