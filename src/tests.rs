//! Crate-level tests for `riddle_me_this`.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same seed → identical riddle sequence; different seeds → varied sequences |
//! | Structural | ID prefixes per level; every bank answer is accepted; hints never leak answers |
//! | Pool | Reuse chance behaves statistically; re-served riddles come from the right level |
//! | Backends | Translation, translation fallback, and unsafe replies through custom trait objects |

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Result, RiddleError};
use crate::riddle_engine::{
    bank, evaluator, generate_riddle,
    safety::SAFE_REDIRECT,
    Backends, ChatPrompt, Companion, GameSession, KeywordScreen, Language, Level, Riddle,
    RiddleRequest, SessionSettings,
};

// ── helpers ──────────────────────────────────────────────────────────────────

fn settings(seed: u64) -> SessionSettings {
    SessionSettings { rng_seed: Some(seed), ..SessionSettings::default() }
}

/// `id|question` for `n` consecutive draws at `level`.
async fn draw_questions(seed: u64, level: Level, n: usize) -> Vec<String> {
    let backends = Backends::local();
    let mut session = GameSession::new(settings(seed));
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let card = session.new_riddle(level, &backends).await.unwrap();
        out.push(format!("{}|{}", card.riddle_id, card.riddle.question));
    }
    out
}

const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

/// Companion whose "translation" upper-cases the riddle and tags the language.
struct ShoutingTranslator;

#[async_trait]
impl Companion for ShoutingTranslator {
    async fn reply(&self, prompt: &ChatPrompt) -> Result<String> {
        Ok(format!("You said {}", prompt.message))
    }

    async fn translate(&self, riddle: &Riddle, language: Language) -> Result<Riddle> {
        Ok(Riddle::new(
            format!("[{}] {}", language.code(), riddle.question.to_uppercase()),
            riddle.answer.to_uppercase(),
        ))
    }

    fn name(&self) -> &str {
        "shouting"
    }
}

/// Companion that always fails, like an unreachable API.
struct OfflineCompanion;

#[async_trait]
impl Companion for OfflineCompanion {
    async fn reply(&self, _prompt: &ChatPrompt) -> Result<String> {
        Err(RiddleError::Api { status: 503, message: "unavailable".to_string() })
    }

    async fn translate(&self, _riddle: &Riddle, _language: Language) -> Result<Riddle> {
        Err(RiddleError::Api { status: 503, message: "unavailable".to_string() })
    }

    fn name(&self) -> &str {
        "offline"
    }
}

fn backends_with(companion: impl Companion + 'static) -> Backends {
    Backends {
        companion: Arc::new(companion),
        safety: Arc::new(KeywordScreen::default()),
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn same_seed_produces_identical_sequence() {
    for level in Level::ALL {
        for seed in SEEDS {
            assert_eq!(
                draw_questions(seed, level, 8).await,
                draw_questions(seed, level, 8).await,
                "sequence mismatch for {level} seed={seed}"
            );
        }
    }
}

#[tokio::test]
async fn different_seeds_produce_varied_sequences() {
    let mut same = 0usize;
    let pairs = 20u64;
    for seed in 0..pairs {
        if draw_questions(seed, Level::Hard, 6).await == draw_questions(seed + 500, Level::Hard, 6).await {
            same += 1;
        }
    }
    assert!(same < pairs as usize / 4, "too many identical sequences ({same}/{pairs})");
}

#[test]
fn generate_riddle_is_deterministic_with_seed() {
    let a = generate_riddle(RiddleRequest { level: Level::Medium, rng_seed: Some(12345) });
    let b = generate_riddle(RiddleRequest { level: Level::Medium, rng_seed: Some(12345) });
    assert_eq!(a.riddle_id, b.riddle_id);
    assert_eq!(a.riddle, b.riddle);
}

#[test]
fn entropy_seed_produces_a_valid_riddle() {
    let card = generate_riddle(RiddleRequest::new(Level::Easy));
    assert!(card.riddle_id.starts_with("EZ-"));
    assert!(bank::riddles_for(Level::Easy).contains(&card.riddle));
}

// ── structural invariants ────────────────────────────────────────────────────

#[test]
fn riddle_ids_carry_level_prefix() {
    let expected = [(Level::Easy, "EZ-"), (Level::Medium, "MD-"), (Level::Hard, "HD-")];
    for (level, prefix) in expected {
        for seed in SEEDS {
            let card = generate_riddle(RiddleRequest { level, rng_seed: Some(seed) });
            assert!(
                card.riddle_id.starts_with(prefix),
                "ID '{}' for {level} does not start with '{prefix}'",
                card.riddle_id
            );
            assert_eq!(card.riddle_id.len(), prefix.len() + 8);
        }
    }
}

#[test]
fn every_bank_answer_is_accepted() {
    for level in Level::ALL {
        for riddle in bank::riddles_for(level) {
            assert!(evaluator::evaluate_answer(&riddle.answer, &riddle.answer));
            assert!(evaluator::evaluate_answer(&format!("  {}  ", riddle.answer.to_uppercase()), &riddle.answer));
        }
    }
}

#[test]
fn hints_never_give_the_answer_away() {
    for level in Level::ALL {
        for riddle in bank::riddles_for(level) {
            let hint = evaluator::hint_for(&riddle).to_lowercase();
            assert!(!hint.contains(&riddle.answer), "hint for {:?} leaks the answer", riddle.question);
        }
    }
}

// ── pool behaviour ───────────────────────────────────────────────────────────

#[tokio::test]
async fn half_reuse_grows_pool_about_half_the_time() {
    let backends = Backends::local();
    let mut session = GameSession::new(settings(77));
    let draws = 400;
    for _ in 0..draws {
        session.new_riddle(Level::Easy, &backends).await.unwrap();
    }
    let grown = session.pool().len(Level::Easy) - 3;
    assert!(
        (120..=280).contains(&grown),
        "expected roughly {} fresh draws out of {draws}, got {grown}",
        draws / 2
    );
}

#[tokio::test]
async fn served_riddles_match_requested_level() {
    let backends = Backends::local();
    let mut session = GameSession::new(settings(31));
    for level in Level::ALL {
        let expected = bank::riddles_for(level);
        for _ in 0..10 {
            let card = session.new_riddle(level, &backends).await.unwrap();
            assert_eq!(card.level, level);
            assert!(expected.contains(&card.riddle), "{:?} is not a {level} riddle", card.riddle);
        }
    }
}

// ── backends ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn non_english_sessions_get_translated_riddles() {
    let backends = backends_with(ShoutingTranslator);
    let mut session = GameSession::new(SessionSettings {
        language: Language::German,
        ..settings(3)
    });
    let card = session.new_riddle(Level::Easy, &backends).await.unwrap().clone();
    assert_eq!(card.language, Language::German);
    assert!(card.riddle.question.starts_with("[de] "));

    // The translated answer is what gets checked.
    let outcome = session.submit_answer(&card.riddle.answer.to_lowercase()).unwrap();
    assert!(outcome.is_correct);
}

#[tokio::test]
async fn english_sessions_skip_translation() {
    let backends = backends_with(ShoutingTranslator);
    let mut session = GameSession::new(settings(3));
    let card = session.new_riddle(Level::Easy, &backends).await.unwrap();
    assert!(!card.riddle.question.starts_with('['));
}

#[tokio::test]
async fn failed_translation_falls_back_to_english() {
    let backends = backends_with(OfflineCompanion);
    let mut session = GameSession::new(SessionSettings {
        language: Language::Thai,
        ..settings(4)
    });
    let card = session.new_riddle(Level::Medium, &backends).await.unwrap();
    assert_eq!(card.language, Language::English);
    assert!(bank::riddles_for(Level::Medium).contains(&card.riddle));
}

#[tokio::test]
async fn failed_chat_leaves_history_untouched() {
    let backends = backends_with(OfflineCompanion);
    let mut session = GameSession::new(settings(5));
    let err = session.chat("hello", &backends).await.unwrap_err();
    assert!(matches!(err, RiddleError::Api { status: 503, .. }));
    assert!(session.history().is_empty());
}

#[tokio::test]
async fn unsafe_reply_is_replaced() {
    struct Grumpy;

    #[async_trait]
    impl Companion for Grumpy {
        async fn reply(&self, _prompt: &ChatPrompt) -> Result<String> {
            Ok("You are a gherkin.".to_string())
        }
        async fn translate(&self, riddle: &Riddle, _language: Language) -> Result<Riddle> {
            Ok(riddle.clone())
        }
        fn name(&self) -> &str {
            "grumpy"
        }
    }

    let backends = Backends {
        companion: Arc::new(Grumpy),
        safety: Arc::new(KeywordScreen::with_words(["gherkin"])),
    };
    let mut session = GameSession::new(settings(6));

    let reply = session.stump("What is green and sour?", &backends).await.unwrap();
    assert_eq!(reply, SAFE_REDIRECT);

    let history = session.chat("hello", &backends).await.unwrap();
    assert_eq!(history, ["User: hello".to_string(), format!("AI: {SAFE_REDIRECT}")]);
}
