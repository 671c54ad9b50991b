//! Stride Predictor.
//!
//! Detects a constant distance between consecutive demand blocks and keeps a
//! saturating confidence counter for it.
//!
//! The counter gains [`CONFIDENCE_GAIN`] when the observed stride repeats and
//! loses [`CONFIDENCE_PENALTY`] otherwise, clamped to `[0, CONFIDENCE_MAX]`.
//! Confidence is reported to the caller but never gates prefetch issue.
//!
//! # Performance
//!
//! - **Time Complexity:** `update()` O(1)
//! - **Space Complexity:** O(1), a single tracking entry
//! - **Best Case:** Array traversals with a fixed element stride
//! - **Worst Case:** Random or pointer-chasing streams (confidence decays to 0)

use serde::{Deserialize, Serialize};

use super::Predictor;
use crate::common::constants::{CONFIDENCE_GAIN, CONFIDENCE_MAX, CONFIDENCE_PENALTY};

/// Stride predictor state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StridePredictorState {
    /// Block of the previous access.
    pub last_address_block: u64,
    /// Most recently observed stride, in blocks.
    pub stride: i64,
    /// Confidence in `stride`, in `[0, 100]`.
    pub confidence: u8,
}

/// Single-entry stride detector.
#[derive(Debug, Clone, Default)]
pub struct StridePredictor {
    state: StridePredictorState,
}

impl StridePredictor {
    /// Creates a predictor with zero stride and zero confidence.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub const fn state(&self) -> StridePredictorState {
        self.state
    }
}

impl Predictor for StridePredictor {
    fn update(&mut self, current_block: u64) {
        let state = &mut self.state;
        let observed = current_block as i64 - state.last_address_block as i64;

        state.confidence = if observed == state.stride {
            state.confidence.saturating_add(CONFIDENCE_GAIN).min(CONFIDENCE_MAX)
        } else {
            state.confidence.saturating_sub(CONFIDENCE_PENALTY)
        };
        state.stride = observed;
        state.last_address_block = current_block;
    }
}
