//! Randomness adapters for the daily luck perturbation

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::application::ports::outbound::RandomSource;

/// Thread-local generator, non-reproducible
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn perturbation(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        rand::thread_rng().gen_range(min..=max)
    }
}

/// Deterministic generator for reproducible runs
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn perturbation(&self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(min..=max),
            Err(poisoned) => poisoned.into_inner().gen_range(min..=max),
        }
    }
}
