//! Fully-Associative Cache Store.
//!
//! This module implements the single-level cache the lessons visualise: a
//! fixed array of lines with no set partitioning, a global LRU approximation
//! based on the step each line was last touched, and per-line flags that let
//! the engine tell demand fills from speculative prefetch fills.
//!
//! # Performance
//!
//! - **Time Complexity:**
//!   - `lookup()`: O(N) linear scan
//!   - `select_victim()`: O(N)
//!   - `insert()` / `touch()`: O(1)
//! - **Space Complexity:** O(N) where N is `cache_size / line_size`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::common::constants::{PLACEHOLDER_SEED_SALT, RANDOM_BLOCK_RANGE};

/// Cache line entry.
///
/// `id` is stable for the lifetime of a run and always equals the line's
/// position in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheLine {
    /// Position of the line in the store.
    pub id: usize,
    /// Block number held by the line. Meaningless while `valid` is false.
    pub tag: u64,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Whether the line was written. Reads only, so always false today.
    pub dirty: bool,
    /// Whether the current block was installed by the prefetch issuer.
    pub prefetched: bool,
    /// Whether a demand access has used the current block.
    pub accessed: bool,
    /// Step of the last fill or demand hit; drives victim selection.
    pub last_accessed_step: u64,
}

impl CacheLine {
    /// Returns true for a speculative fill that no demand access has used yet.
    pub const fn is_unused_prefetch(&self) -> bool {
        self.valid && self.prefetched && !self.accessed
    }
}

/// Fixed-size cache line array.
#[derive(Debug, Clone)]
pub struct CacheStore {
    lines: Vec<CacheLine>,
}

impl CacheStore {
    /// Creates a store of `num_lines` invalid lines.
    ///
    /// Invalid lines carry random placeholder tags drawn from `noise_seed`.
    /// They are never matched by [`CacheStore::lookup`]; the noise only makes
    /// the cold cache look populated in a rendered table.
    pub fn new(num_lines: usize, noise_seed: u64) -> Self {
        let mut noise = StdRng::seed_from_u64(noise_seed ^ PLACEHOLDER_SEED_SALT);
        let lines = (0..num_lines)
            .map(|id| CacheLine {
                id,
                tag: noise.gen_range(0..RANDOM_BLOCK_RANGE),
                valid: false,
                dirty: false,
                prefetched: false,
                accessed: false,
                last_accessed_step: 0,
            })
            .collect();
        Self { lines }
    }

    /// All lines, ordered by `id`.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the store has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Finds the first valid line holding `tag`.
    pub fn lookup(&self, tag: u64) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.valid && line.tag == tag)
    }

    /// Records a demand hit on line `index` at `step`.
    pub fn touch(&mut self, index: usize, step: u64) {
        let line = &mut self.lines[index];
        line.last_accessed_step = step;
        line.accessed = true;
    }

    /// Chooses the line to replace.
    ///
    /// The lowest-index invalid line wins; otherwise the line with the oldest
    /// `last_accessed_step`, ties going to the lowest index.
    ///
    /// # Panics
    ///
    /// Panics on an empty store. Configuration validation guarantees at least
    /// one line, so reaching this is a defect.
    pub fn select_victim(&self) -> usize {
        assert!(!self.lines.is_empty(), "victim selection on an empty cache store");
        if let Some(free) = self.lines.iter().position(|line| !line.valid) {
            return free;
        }
        self.lines
            .iter()
            .min_by_key(|line| (line.last_accessed_step, line.id))
            .map_or(0, |line| line.id)
    }

    /// Overwrites line `index` with `tag` and returns the previous occupant.
    ///
    /// Demand fills are marked accessed; prefetch fills are not.
    pub fn insert(&mut self, index: usize, tag: u64, step: u64, prefetched: bool) -> CacheLine {
        let slot = &mut self.lines[index];
        let previous = *slot;
        *slot = CacheLine {
            id: index,
            tag,
            valid: true,
            dirty: false,
            prefetched,
            accessed: !prefetched,
            last_accessed_step: step,
        };
        previous
    }

    /// Invalidates line `index` if it holds an unused prefetch of a block
    /// other than `block_tag`.
    ///
    /// Returns true when a useless prefetch was reclaimed, so the caller can
    /// count it before reusing the slot.
    pub fn invalidate_if_unused_prefetch(&mut self, index: usize, block_tag: u64) -> bool {
        let line = &mut self.lines[index];
        if line.is_unused_prefetch() && line.tag != block_tag {
            line.valid = false;
            return true;
        }
        false
    }
}
