//! Simulation statistics collection and reporting.
//!
//! This module tracks the running counters of a run. It provides:
//! 1. **Demand counters:** Hits and misses of the generated access stream.
//! 2. **Prefetch counters:** Fills issued, fills later hit, and fills wasted.
//! 3. **Derived metrics:** Accuracy and coverage as percentages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Running statistics for one run.
///
/// `accuracy` and `coverage` are derived; call [`Statistics::recompute`]
/// after changing the counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Demand accesses that found their block resident.
    pub hits: u64,
    /// Demand accesses that had to fill a line.
    pub misses: u64,
    /// Hits on lines installed by the prefetch issuer.
    pub prefetch_hits: u64,
    /// Prefetch fills issued (speculative, not yet known to be useful).
    pub prefetch_misses: u64,
    /// Prefetch fills evicted before any demand access used them.
    pub useless_prefetches: u64,
    /// `hits / (hits + misses) * 100`, or 0 before the first access.
    pub accuracy: f64,
    /// `prefetch_hits / (prefetch_hits + prefetch_misses) * 100`, or 0.
    pub coverage: f64,
}

/// Percentage of `part` in `part + rest`, 0 for an empty denominator.
fn percentage(part: u64, rest: u64) -> f64 {
    let total = part + rest;
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

impl Statistics {
    /// Creates zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Demand accesses so far.
    pub const fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }

    /// Counts a demand hit; `prefetched` marks a hit on a prefetch fill.
    pub fn record_hit(&mut self, prefetched: bool) {
        self.hits += 1;
        if prefetched {
            self.prefetch_hits += 1;
        }
    }

    /// Counts a demand miss.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    /// Counts `issued` prefetch fills.
    pub fn record_prefetch_fills(&mut self, issued: u64) {
        self.prefetch_misses += issued;
    }

    /// Counts `wasted` prefetch fills that were evicted unused.
    pub fn record_useless(&mut self, wasted: u64) {
        self.useless_prefetches += wasted;
    }

    /// Refreshes `accuracy` and `coverage` from the counters.
    pub fn recompute(&mut self) {
        self.accuracy = percentage(self.hits, self.misses);
        self.coverage = percentage(self.prefetch_hits, self.prefetch_misses);
    }
}

impl fmt::Display for Statistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CACHE")?;
        writeln!(f, "  accesses           {:>10}", self.total_accesses())?;
        writeln!(f, "  hits               {:>10}", self.hits)?;
        writeln!(f, "  misses             {:>10}", self.misses)?;
        writeln!(f, "  accuracy           {:>9.2}%", self.accuracy)?;
        writeln!(f, "PREFETCH")?;
        writeln!(f, "  issued             {:>10}", self.prefetch_misses)?;
        writeln!(f, "  hits               {:>10}", self.prefetch_hits)?;
        writeln!(f, "  useless            {:>10}", self.useless_prefetches)?;
        write!(f, "  coverage           {:>9.2}%", self.coverage)
    }
}
