//! Synthetic access-stream generator.
//!
//! Produces the demand address for a given step. Every pattern except
//! `Random` is a pure function of the step index; `Random` draws from a
//! seeded generator, so a run is reproducible from its configuration.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::common::constants::RANDOM_BLOCK_RANGE;
use crate::config::{AccessPattern, Configuration};

/// Address generator for one run.
#[derive(Debug, Clone)]
pub struct AddressGenerator {
    pattern: AccessPattern,
    line_bytes: u64,
    stride: u64,
    chase_length: u64,
    rng: StdRng,
}

impl AddressGenerator {
    /// Creates a generator for a validated configuration.
    pub fn new(config: &Configuration) -> Self {
        Self {
            pattern: config.access_pattern,
            line_bytes: config.line_size_bytes,
            stride: config.stride_distance,
            chase_length: config.pointer_chase_length,
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Returns the demand address for `step`.
    ///
    /// # Panics
    ///
    /// Panics if the line size is zero; validation rejects such configurations.
    pub fn next(&mut self, step: u64) -> u64 {
        assert!(self.line_bytes > 0, "address generator built with zero line size");
        let block = match self.pattern {
            AccessPattern::Sequential => step,
            AccessPattern::Random => self.rng.gen_range(0..RANDOM_BLOCK_RANGE),
            AccessPattern::Stride => step.saturating_mul(self.stride),
            AccessPattern::PointerChase => step % self.chase_length.max(1),
        };
        block.saturating_mul(self.line_bytes)
    }

    /// Block tag of an address, `floor(address / line_size)`.
    pub const fn block_of(&self, address: u64) -> u64 {
        address / self.line_bytes
    }
}
