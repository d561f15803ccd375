//! # riddle_me_this
//!
//! A children's riddle game: pick a level and a language, solve riddles, try
//! to stump the helper with your own riddle, or just chat with it.
//!
//! ## How it works
//!
//! 1. Create a [`GameSession`] from [`SessionSettings`]. This seeds the RNG
//!    and preloads a small riddle pool for every level.
//! 2. Call [`GameSession::new_riddle`]. The session either re-serves a pooled
//!    riddle or draws a fresh one from the bank, translating it when the
//!    session language is not English.
//! 3. Submit answers, ask for hints, or talk to the helper. Every helper
//!    exchange passes through the [`SafetyScreen`] on the way in and out.
//!
//! The helper and the screen are trait objects bundled in [`Backends`]:
//! [`Backends::local`] works fully offline, while a `hosted` backend in the
//! config calls an inference API with a token from the environment.
//!
//! ## Quick start
//!
//! ```rust
//! use riddle_me_this::{Backends, GameSession, Level, SessionSettings};
//!
//! # tokio_test::block_on(async {
//! let backends = Backends::local();
//! let mut session = GameSession::new(SessionSettings {
//!     rng_seed: Some(42),
//!     ..SessionSettings::default()
//! });
//!
//! let card = session.new_riddle(Level::Easy, &backends).await.unwrap();
//! println!("Q: {}", card.riddle.question);
//!
//! let outcome = session.submit_answer("a clock").unwrap();
//! println!("{} ({})", outcome.message, session.progress());
//! # });
//! ```
//!
//! One-off riddles without a session:
//!
//! ```rust
//! use riddle_me_this::{generate_riddle, Level, RiddleRequest};
//!
//! let card = generate_riddle(RiddleRequest { level: Level::Hard, rng_seed: Some(7) });
//! assert!(card.riddle_id.starts_with("HD-"));
//! ```

pub mod config;
pub mod error;
pub mod logger;
pub mod play;
pub mod riddle_engine;
pub mod web;

// Convenience re-exports so callers can use `riddle_me_this::GameSession`
// directly without reaching into `riddle_engine::`.
pub use config::AppConfig;
pub use error::{Result, RiddleError};
pub use riddle_engine::{
    generate_riddle, AnswerOutcome, Backends, ChatPrompt, Companion, GameSession, KeywordScreen,
    Language, Level, Mode, Persona, Progress, Riddle, RiddleCard, RiddleRequest,
    RuleBasedCompanion, SafetyScreen, SafetyVerdict, SessionSettings, SoundCue,
};

#[cfg(test)]
mod tests;
