//! Step Engine.
//!
//! Owns every piece of mutable run state and advances it one access at a
//! time. A step runs the following pipeline:
//! 1. **Generate:** Ask the workload for the demand address and derive its block.
//! 2. **Classify:** Look the block up in the cache store.
//! 3. **Fill:** On a hit, refresh the line; on a miss, reclaim a stale
//!    prefetch if the victim holds one, install the block, then issue prefetches.
//! 4. **Predict:** Update the predictor of the configured strategy.
//! 5. **Report:** Recompute derived statistics and emit a [`StepResult`].
//!
//! Every step is atomic with respect to the state it touches, so stopping
//! between steps always leaves a consistent cache.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::Configuration;
use crate::stats::Statistics;
use crate::units::cache::{CacheLine, CacheStore};
use crate::units::prefetch::{PredictorSnapshot, Predictors, PrefetchIssuer};
use crate::workload::AddressGenerator;

/// Everything the presentation layer needs about one step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// Zero-based step index.
    pub step_index: u64,
    /// Demand address produced by the workload.
    pub generated_address: u64,
    /// Block tag of `generated_address`.
    pub block: u64,
    /// Whether the demand access hit.
    pub hit: bool,
    /// Whether the hit line had been installed by the prefetch issuer.
    pub was_prefetched: bool,
    /// Blocks the prefetch issuer installed during this step.
    pub prefetched_blocks: Vec<u64>,
    /// Unused prefetch fills evicted during this step.
    pub useless_reclaimed: u64,
    /// Cache lines after the step, ordered by id.
    pub cache_snapshot: Vec<CacheLine>,
    /// Predictor states after the step.
    pub predictor_snapshot: PredictorSnapshot,
    /// Statistics after the step.
    pub statistics: Statistics,
}

/// Mutable state of a run plus the components that act on it.
#[derive(Debug, Clone)]
pub struct StepEngine {
    workload: AddressGenerator,
    store: CacheStore,
    predictors: Predictors,
    issuer: PrefetchIssuer,
    stats: Statistics,
}

impl StepEngine {
    /// Builds fresh state for a validated configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration describes an empty cache; callers must
    /// validate first.
    pub fn new(config: &Configuration) -> Self {
        let num_lines = config.num_lines();
        assert!(num_lines > 0, "step engine built from an unvalidated configuration");
        Self {
            workload: AddressGenerator::new(config),
            store: CacheStore::new(num_lines, config.seed),
            predictors: Predictors::new(config),
            issuer: PrefetchIssuer::new(config),
            stats: Statistics::new(),
        }
    }

    /// Cache store.
    pub const fn store(&self) -> &CacheStore {
        &self.store
    }

    /// Predictors.
    pub const fn predictors(&self) -> &Predictors {
        &self.predictors
    }

    /// Statistics accumulated so far.
    pub const fn statistics(&self) -> &Statistics {
        &self.stats
    }

    /// Executes step `step` and returns its result.
    pub fn step(&mut self, step: u64) -> StepResult {
        let address = self.workload.next(step);
        let block = self.workload.block_of(address);

        let mut was_prefetched = false;
        let mut prefetched_blocks = Vec::new();
        let mut useless_reclaimed = 0;

        let hit = match self.store.lookup(block) {
            Some(index) => {
                was_prefetched = self.store.lines()[index].prefetched;
                self.store.touch(index, step);
                self.stats.record_hit(was_prefetched);
                true
            }
            None => {
                self.stats.record_miss();
                let victim = self.store.select_victim();
                if self.store.invalidate_if_unused_prefetch(victim, block) {
                    trace!(step, victim, "demand fill evicted an unused prefetch");
                    useless_reclaimed += 1;
                }
                let evicted = self.store.insert(victim, block, step, false);
                trace!(
                    step,
                    block,
                    victim,
                    evicted = ?evicted.valid.then_some(evicted.tag),
                    "demand fill"
                );

                if self.issuer.is_active() {
                    let report = self.issuer.issue(&mut self.store, block, step);
                    useless_reclaimed += report.useless_evictions;
                    self.stats.record_prefetch_fills(report.inserted.len() as u64);
                    prefetched_blocks = report.inserted;
                }
                false
            }
        };
        self.stats.record_useless(useless_reclaimed);

        self.predictors.update(block);
        self.stats.recompute();

        debug!(
            step,
            address,
            block,
            hit,
            was_prefetched,
            prefetches = prefetched_blocks.len(),
            "access classified"
        );

        StepResult {
            step_index: step,
            generated_address: address,
            block,
            hit,
            was_prefetched,
            prefetched_blocks,
            useless_reclaimed,
            cache_snapshot: self.store.lines().to_vec(),
            predictor_snapshot: self.predictors.snapshot(),
            statistics: self.stats,
        }
    }
}
