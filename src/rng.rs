//! Random gem sources.
//!
//! The engine never calls a global RNG. Every random draw goes through a
//! [`GemSource`], so a fixed seed (or a scripted source in tests) makes fills,
//! pre-match resolution and refills fully reproducible.

use crate::config::validate_gem_types;
use crate::error::Result;
use crate::gem::GemType;

/// Source of random gem types.
pub trait GemSource {
    /// Number of gem types in play (a prefix of [`GemType::ALL`]).
    fn gem_type_count(&self) -> usize;

    /// Uniform sample in `[0, 1)`.
    fn next_uniform(&mut self) -> f64;

    /// Uniformly random gem type among the types in play.
    fn next_gem_type(&mut self) -> GemType {
        let n = self.gem_type_count();
        let i = ((self.next_uniform() * n as f64) as usize).min(n - 1);
        GemType::ALL[i]
    }

    /// Uniformly random choice from `candidates`, which must not be empty.
    fn pick(&mut self, candidates: &[GemType]) -> GemType {
        let i = ((self.next_uniform() * candidates.len() as f64) as usize)
            .min(candidates.len() - 1);
        candidates[i]
    }
}

/// Seedable source backed by `fastrand`.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: fastrand::Rng,
    gem_types: usize,
}

impl SeededSource {
    /// Seeded source drawing from the first `gem_types` types.
    ///
    /// Fails unless `gem_types` is within the supported range.
    pub fn new(seed: u64, gem_types: usize) -> Result<Self> {
        validate_gem_types(gem_types)?;
        Ok(Self {
            rng: fastrand::Rng::with_seed(seed),
            gem_types,
        })
    }
}

impl GemSource for SeededSource {
    fn gem_type_count(&self) -> usize {
        self.gem_types
    }

    fn next_uniform(&mut self) -> f64 {
        self.rng.f64()
    }

    fn next_gem_type(&mut self) -> GemType {
        GemType::ALL[self.rng.usize(..self.gem_types)]
    }

    fn pick(&mut self, candidates: &[GemType]) -> GemType {
        candidates[self.rng.usize(..candidates.len())]
    }
}

/// Source that replays a fixed cycle of gem types.
///
/// Useful for exact refill scenarios. `next_uniform` walks the same cycle,
/// mapping each type to the midpoint of its slot.
#[derive(Clone, Debug)]
pub struct ScriptedSource {
    script: Vec<GemType>,
    next: usize,
    gem_types: usize,
}

impl ScriptedSource {
    /// Source replaying `script`, which must not be empty.
    pub fn new(script: Vec<GemType>, gem_types: usize) -> Result<Self> {
        assert!(!script.is_empty(), "scripted source needs at least one gem type");
        validate_gem_types(gem_types)?;
        Ok(Self {
            script,
            next: 0,
            gem_types,
        })
    }

    fn advance(&mut self) -> GemType {
        let kind = self.script[self.next % self.script.len()];
        self.next += 1;
        kind
    }
}

impl GemSource for ScriptedSource {
    fn gem_type_count(&self) -> usize {
        self.gem_types
    }

    fn next_uniform(&mut self) -> f64 {
        let kind = self.advance();
        (kind.index() as f64 + 0.5) / self.gem_types as f64
    }

    fn next_gem_type(&mut self) -> GemType {
        self.advance()
    }
}
