//! Probability sources - the only place randomness enters the crate.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Answers a weighted yes/no question.
pub trait ProbabilitySource: Send + Sync {
    /// Returns `true` with the given probability (clamped to `[0, 1]`).
    fn next_bool(&self, probability: f64) -> bool;
}

impl<F> ProbabilitySource for F
where
    F: Fn(f64) -> bool + Send + Sync,
{
    fn next_bool(&self, probability: f64) -> bool {
        self(probability)
    }
}

/// Pseudo-random source backed by `StdRng`.
pub struct RandomSource {
    rng: Mutex<StdRng>,
}

impl RandomSource {
    /// Seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ProbabilitySource for RandomSource {
    fn next_bool(&self, probability: f64) -> bool {
        let p = clamp_probability(probability);
        match self.rng.lock() {
            Ok(mut rng) => rng.gen_bool(p),
            // A poisoned rng still holds a valid state.
            Err(poisoned) => poisoned.into_inner().gen_bool(p),
        }
    }
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSource(pub bool);

impl ProbabilitySource for FixedSource {
    fn next_bool(&self, _probability: f64) -> bool {
        self.0
    }
}

pub(crate) fn clamp_probability(probability: f64) -> f64 {
    if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    }
}
