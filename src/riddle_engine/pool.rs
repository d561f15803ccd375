//! Per-level pool of riddles already seen in a session.
//!
//! New riddles are sometimes re-served from the pool and otherwise drawn fresh
//! from the bank, with every fresh draw remembered for later reuse.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::riddle_engine::{
    bank,
    models::{Level, Riddle},
};

#[derive(Debug, Clone, Default)]
pub struct RiddlePool {
    by_level: HashMap<Level, Vec<Riddle>>,
}

impl RiddlePool {
    /// Pool seeded with `per_level` bank draws for every level (repeats allowed).
    pub fn preloaded<R: Rng>(rng: &mut R, per_level: usize) -> Self {
        let mut pool = RiddlePool::default();
        for level in Level::ALL {
            let entry = pool.by_level.entry(level).or_default();
            for _ in 0..per_level {
                entry.push(bank::pick(rng, level));
            }
        }
        pool
    }

    /// Re-serve a pooled riddle with probability `reuse_chance`, else draw
    /// fresh from the bank and append it.
    pub fn draw<R: Rng>(&mut self, rng: &mut R, level: Level, reuse_chance: f64) -> Riddle {
        let reuse = rng.gen_bool(reuse_chance.clamp(0.0, 1.0));
        let pooled = self.by_level.entry(level).or_default();

        if reuse {
            if let Some(riddle) = pooled.choose(rng) {
                return riddle.clone();
            }
        }

        let fresh = bank::pick(rng, level);
        pooled.push(fresh.clone());
        fresh
    }

    pub fn len(&self, level: Level) -> usize {
        self.by_level.get(&level).map_or(0, Vec::len)
    }

    pub fn is_empty(&self, level: Level) -> bool {
        self.len(level) == 0
    }
}
