//! Uniform random draws feeding the transition stage.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tagsf_core::{Error, Result};

/// Seed used when none is configured; matches the historical analysis seed.
pub const DEFAULT_SEED: u64 = 1234;

/// Source of independent uniform draws in `[0, 1)`.
pub trait UniformSource {
    /// Next draw.
    fn next_uniform(&mut self) -> f64;
}

impl<U: UniformSource + ?Sized> UniformSource for &mut U {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Reproducible generator: the same seed yields the same draw sequence.
#[derive(Debug, Clone)]
pub struct SeededUniform {
    seed: u64,
    rng: StdRng,
}

impl SeededUniform {
    /// Seed a new generator.
    pub fn new(seed: u64) -> Self {
        Self { seed, rng: StdRng::seed_from_u64(seed) }
    }

    /// Seed this generator was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Default for SeededUniform {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl UniformSource for SeededUniform {
    fn next_uniform(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Useful to pin down the exact branch a transition takes in tests; not
/// re-exported at the crate root.
#[derive(Debug, Clone)]
pub struct ScriptedDraws {
    values: Vec<f64>,
    consumed: usize,
}

impl ScriptedDraws {
    /// Every value must lie in `[0, 1)`.
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::Validation("scripted draws must not be empty".into()));
        }
        if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(Error::Validation(format!("scripted draw {bad} is outside [0, 1)")));
        }
        Ok(Self { values, consumed: 0 })
    }

    /// Number of draws handed out so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl UniformSource for ScriptedDraws {
    fn next_uniform(&mut self) -> f64 {
        let v = self.values[self.consumed % self.values.len()];
        self.consumed += 1;
        v
    }
}
