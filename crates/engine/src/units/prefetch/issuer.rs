//! Prefetch Issuer.
//!
//! Turns a demand miss into speculative fills. The candidate set depends only
//! on the configured strategy and the miss block, never on predictor state:
//!
//! * `sequential`: `miss + 1`
//! * `stride`: `miss + stride`, `miss + 2 * stride`
//! * `stream`: `miss + 1 ..= miss + window`
//!
//! Candidates already resident are skipped. Each remaining candidate takes a
//! victim chosen by the same rule as demand fills.

use tracing::trace;

use crate::config::{Configuration, PrefetchType};
use crate::units::cache::CacheStore;

/// Outcome of one issue round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueReport {
    /// Blocks inserted, in issue order.
    pub inserted: Vec<u64>,
    /// Unused prefetched lines evicted to make room.
    pub useless_evictions: u64,
}

/// Computes and installs prefetch fills.
#[derive(Debug, Clone, Copy)]
pub struct PrefetchIssuer {
    kind: PrefetchType,
    degree: u64,
    stride: u64,
}

impl PrefetchIssuer {
    /// Creates the issuer for a configuration.
    pub const fn new(config: &Configuration) -> Self {
        Self {
            kind: config.prefetch_type,
            degree: config.prefetch_degree(),
            stride: config.stride_distance,
        }
    }

    /// Returns true unless the strategy is `none`.
    pub const fn is_active(&self) -> bool {
        !matches!(self.kind, PrefetchType::None)
    }

    /// Candidate blocks for a miss on `miss_block`, in issue order.
    pub fn candidates(&self, miss_block: u64) -> impl Iterator<Item = u64> + use<> {
        let step = match self.kind {
            PrefetchType::Stride => self.stride,
            _ => 1,
        };
        (1..=self.degree).map(move |i| miss_block.saturating_add(i.saturating_mul(step)))
    }

    /// Installs every non-resident candidate for `miss_block` at `step`.
    pub fn issue(&self, store: &mut CacheStore, miss_block: u64, step: u64) -> IssueReport {
        let mut report = IssueReport::default();
        if !self.is_active() {
            return report;
        }

        for block in self.candidates(miss_block) {
            if store.lookup(block).is_some() {
                trace!(step, block, "prefetch candidate already resident");
                continue;
            }
            let victim = store.select_victim();
            if store.invalidate_if_unused_prefetch(victim, block) {
                trace!(step, victim, "prefetch evicted an unused prefetch");
                report.useless_evictions += 1;
            }
            let evicted = store.insert(victim, block, step, true);
            trace!(
                step,
                block,
                victim,
                evicted = ?evicted.valid.then_some(evicted.tag),
                "prefetch fill"
            );
            report.inserted.push(block);
        }
        report
    }
}
