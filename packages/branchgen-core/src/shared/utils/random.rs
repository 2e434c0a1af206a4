//! Seeded random source
//!
//! All randomness in synthesis is drawn from one [`SeededRandom`] so that a
//! fixed seed reproduces a suite exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform in `low..high`; returns `low` for an empty range
    pub fn range_i64(&mut self, low: i64, high: i64) -> i64 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }

    /// Uniform in `low..=high`
    pub fn range_inclusive(&mut self, low: usize, high: usize) -> usize {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..=high)
    }

    pub fn coin(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }

    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..items.len());
        items.get(idx)
    }
}
