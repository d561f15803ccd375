use rand::{rngs::StdRng, SeedableRng};
use rand::RngCore;

use crate::riddle_engine::{
    bank,
    models::{Language, Level, RiddleCard, RiddleRequest, Riddle},
};

/// Build a riddle ID from level + rng.
pub fn make_riddle_id(level: Level, rng: &mut impl RngCore) -> String {
    let prefix = match level {
        Level::Easy   => "EZ",
        Level::Medium => "MD",
        Level::Hard   => "HD",
    };
    format!("{}-{:08X}", prefix, rng.next_u32())
}

/// Wrap a riddle into a card, drawing its ID from `rng`.
pub fn card(rng: &mut impl RngCore, level: Level, language: Language, riddle: Riddle) -> RiddleCard {
    RiddleCard {
        riddle_id: make_riddle_id(level, rng),
        level,
        language,
        riddle,
    }
}

/// One-shot entry point: a fresh riddle straight from the bank.
///
/// With `rng_seed: Some(_)` the result is fully reproducible.
pub fn generate_riddle(request: RiddleRequest) -> RiddleCard {
    let mut rng: StdRng = match request.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    };

    let riddle_id = make_riddle_id(request.level, &mut rng);
    let riddle = bank::pick(&mut rng, request.level);

    RiddleCard {
        riddle_id,
        level: request.level,
        language: Language::English,
        riddle,
    }
}
