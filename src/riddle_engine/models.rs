use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RiddleError;

// ---------------------------------------------------------------------------
// Difficulty / language
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Easy   => write!(f, "Easy"),
            Level::Medium => write!(f, "Medium"),
            Level::Hard   => write!(f, "Hard"),
        }
    }
}

impl FromStr for Level {
    type Err = RiddleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy"   => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard"   => Ok(Level::Hard),
            _ => Err(RiddleError::UnknownLevel(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Hindi,
    Thai,
}

impl Language {
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Portuguese,
        Language::Hindi,
        Language::Thai,
    ];

    /// Two-letter ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English    => "en",
            Language::Spanish    => "es",
            Language::French     => "fr",
            Language::German     => "de",
            Language::Italian    => "it",
            Language::Portuguese => "pt",
            Language::Hindi      => "hi",
            Language::Thai       => "th",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Language::English    => "English",
            Language::Spanish    => "Spanish",
            Language::French     => "French",
            Language::German     => "German",
            Language::Italian    => "Italian",
            Language::Portuguese => "Portuguese",
            Language::Hindi      => "Hindi",
            Language::Thai       => "Thai",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accepts either the code (`"es"`) or the display name (`"Spanish"`).
impl FromStr for Language {
    type Err = RiddleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .into_iter()
            .find(|l| l.code() == wanted || l.name().to_lowercase() == wanted)
            .ok_or_else(|| RiddleError::UnknownLanguage(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Riddles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Riddle {
    pub question: String,
    pub answer: String,
}

impl Riddle {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Riddle { question: question.into(), answer: answer.into() }
    }
}

/// A riddle as handed to a player: the riddle plus where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiddleCard {
    /// Level prefix plus eight hex digits, e.g. `"EZ-1A2B3C4D"`.
    pub riddle_id: String,
    pub level: Level,
    pub language: Language,
    pub riddle: Riddle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiddleRequest {
    pub level: Level,
    pub rng_seed: Option<u64>,
}

impl RiddleRequest {
    /// Entropy-seeded request for `level`.
    pub fn new(level: Level) -> Self {
        RiddleRequest { level, rng_seed: None }
    }
}

// ---------------------------------------------------------------------------
// Helper personas and play modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Persona {
    RiddleWizard,
    PuzzlePal,
    BrainyBuddy,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Persona::RiddleWizard, Persona::PuzzlePal, Persona::BrainyBuddy];

    pub fn emoji(self) -> &'static str {
        match self {
            Persona::RiddleWizard => "🧙‍♂️",
            Persona::PuzzlePal    => "😄",
            Persona::BrainyBuddy  => "🧠",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Persona::RiddleWizard => write!(f, "Riddle Wizard"),
            Persona::PuzzlePal    => write!(f, "Puzzle Pal"),
            Persona::BrainyBuddy  => write!(f, "Brainy Buddy"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Answer the current riddle.
    Solve,
    /// The player writes a riddle for the helper.
    Stump,
    /// Free conversation with the helper.
    Chat,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Solve => write!(f, "Solve a riddle"),
            Mode::Stump => write!(f, "Stump the AI with your own riddle"),
            Mode::Chat  => write!(f, "Chat with AI"),
        }
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundCue {
    Success,
    Failure,
}

impl SoundCue {
    pub fn url(self) -> &'static str {
        match self {
            SoundCue::Success => "https://actions.google.com/sounds/v1/cartoon/clang_and_wobble.ogg",
            SoundCue::Failure => "https://actions.google.com/sounds/v1/cartoon/cartoon_boing.ogg",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub is_correct: bool,
    pub message: String,
    pub sound: SoundCue,
    pub score: u32,
    pub attempts: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Progress {
    pub score: u32,
    pub attempts: u32,
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {} / {}", self.score, self.attempts)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyVerdict {
    Safe,
    Unsafe { reason: String },
}

impl SafetyVerdict {
    pub fn is_safe(&self) -> bool {
        matches!(self, SafetyVerdict::Safe)
    }
}
