//! The built-in riddle collection, four riddles per level.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::riddle_engine::models::{Level, Riddle};

/// `(question, answer)` pairs in display order.
const EASY: [(&str, &str); 4] = [
    ("What has hands but can’t clap?", "a clock"),
    ("What has to be broken before you can use it?", "an egg"),
    ("What has a neck but no head?", "a shirt"),
    ("What can run but never walks?", "water"),
];

const MEDIUM: [(&str, &str); 4] = [
    ("What gets wetter the more it dries?", "a towel"),
    ("What has one eye but can’t see?", "a needle"),
    ("What has keys but can’t open locks?", "a piano"),
    ("What can travel around the world while staying in a corner?", "a stamp"),
];

const HARD: [(&str, &str); 4] = [
    ("The more you take, the more you leave behind. What am I?", "footsteps"),
    ("What comes once in a minute, twice in a moment, but never in a thousand years?", "the letter m"),
    ("I speak without a mouth and hear without ears. What am I?", "an echo"),
    ("What has a heart that doesn’t beat?", "an artichoke"),
];

fn entries(level: Level) -> &'static [(&'static str, &'static str)] {
    match level {
        Level::Easy   => &EASY,
        Level::Medium => &MEDIUM,
        Level::Hard   => &HARD,
    }
}

/// Every riddle for `level`.
pub fn riddles_for(level: Level) -> Vec<Riddle> {
    entries(level).iter().map(|(q, a)| Riddle::new(*q, *a)).collect()
}

/// Uniformly random riddle from `level`.
pub fn pick<R: Rng>(rng: &mut R, level: Level) -> Riddle {
    let (q, a) = entries(level)
        .choose(rng)
        .copied()
        .unwrap_or(EASY[0]);
    Riddle::new(q, a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn each_level_has_four_riddles() {
        for level in Level::ALL {
            assert_eq!(riddles_for(level).len(), 4, "{level}");
        }
    }

    #[test]
    fn pick_stays_within_level() {
        let mut rng = StdRng::seed_from_u64(3);
        for level in Level::ALL {
            let bank = riddles_for(level);
            for _ in 0..20 {
                assert!(bank.contains(&pick(&mut rng, level)));
            }
        }
    }
}
