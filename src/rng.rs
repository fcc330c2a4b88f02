//! Random Bit Source
//!
//! An explicit, injectable pseudorandom stream. Every random vector, every
//! even-N tie-break and every `representative` draw comes from a
//! `RandomSource` passed in by the caller, so a seeded source makes the whole
//! computation reproducible.
//!
//! Two sources never share state. `fork()` derives a child stream for work
//! that must not perturb the parent's sequence.

use rand::distributions::{Bernoulli, Distribution};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use tracing::debug;

use crate::{BhvConfig, BhvError, Result};

/// Seeded pseudorandom stream for hypervector generation
#[derive(Debug)]
pub struct RandomSource {
    rng: StdRng,
    /// Seed this source was created from (None: OS entropy)
    seed: Option<u64>,
}

impl RandomSource {
    /// Deterministic source
    pub fn from_seed(seed: u64) -> Self {
        debug!(seed, "seeding random source");
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// Source seeded from OS entropy
    pub fn from_entropy() -> Self {
        debug!("seeding random source from entropy");
        Self {
            rng: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// Source as described by a configuration
    pub fn from_config(config: &BhvConfig) -> Self {
        match config.seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }

    /// Seed this source was created from, if deterministic
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Derive an independent child source.
    ///
    /// The child is seeded from one word of this stream, so forking is
    /// itself deterministic for a seeded parent.
    pub fn fork(&mut self) -> Self {
        let seed = self.rng.next_u64();
        debug!(parent = ?self.seed, child = seed, "forking random source");
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    /// 64 uniform bits
    #[inline]
    pub fn next_word(&mut self) -> u64 {
        self.rng.next_u64()
    }

    /// One uniform bit
    #[inline]
    pub fn next_bool(&mut self) -> bool {
        self.rng.gen()
    }

    /// Uniform index in `0..n` (n > 0)
    #[inline]
    pub fn index(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        self.rng.gen_range(0..n)
    }

    /// Bit distribution with activation probability `p`.
    ///
    /// Fails for p outside [0, 1] (including NaN) instead of clamping.
    pub fn bernoulli(p: f64) -> Result<Bernoulli> {
        if !(0.0..=1.0).contains(&p) {
            return Err(BhvError::InvalidProbability(p));
        }
        Bernoulli::new(p).map_err(|_| BhvError::InvalidProbability(p))
    }

    /// Draw one bit from a prepared distribution
    #[inline]
    pub fn sample(&mut self, dist: &Bernoulli) -> bool {
        dist.sample(&mut self.rng)
    }
}

impl Default for RandomSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}
