//! Core riddle engine: riddle bank, session state, helper chat and safety.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: levels, languages, riddles, personas, outcomes |
//! | `bank`      | The built-in riddle collection and random picks from it |
//! | `pool`      | Per-level pool of riddles a session can re-serve |
//! | `generator` | Riddle IDs and the one-shot `generate_riddle()` entry point |
//! | `evaluator` | Answer checking and the stock hint |
//! | `companion` | The `Companion` trait and the offline keyword companion |
//! | `safety`    | The `SafetyScreen` trait and the offline keyword screen |
//! | `hosted`    | Hosted inference implementations of both traits |
//! | `helpers`   | Prompt builders and reply parsing for the hosted backend |
//! | `session`   | `GameSession`: every player action, plus `Backends` wiring |

pub mod bank;
pub mod companion;
pub mod evaluator;
pub mod generator;
pub mod helpers;
pub mod hosted;
pub mod models;
pub mod pool;
pub mod safety;
pub mod session;

pub use companion::{ChatPrompt, Companion, RuleBasedCompanion};
pub use generator::generate_riddle;
pub use models::{
    AnswerOutcome, Language, Level, Mode, Persona, Progress, Riddle, RiddleCard,
    RiddleRequest, SafetyVerdict, SoundCue,
};
pub use safety::{KeywordScreen, SafetyScreen};
pub use session::{Backends, GameSession, SessionSettings};
