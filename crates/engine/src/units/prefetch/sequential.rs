//! Sequential Predictor.
//!
//! Tracks the block expected to follow the most recent access. The issuer
//! does not consult it; the state exists so a lesson can show what a
//! next-line prefetcher "thinks" comes next.

use serde::{Deserialize, Serialize};

use super::Predictor;

/// Sequential predictor state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequentialPredictorState {
    /// Block expected on the next access.
    pub next_block: u64,
    /// Whether this predictor is the active one for the run.
    pub enabled: bool,
}

/// Next-block tracker.
#[derive(Debug, Clone, Default)]
pub struct SequentialPredictor {
    state: SequentialPredictorState,
}

impl SequentialPredictor {
    /// Creates a predictor; `enabled` marks it as the run's active predictor.
    pub const fn new(enabled: bool) -> Self {
        Self {
            state: SequentialPredictorState {
                next_block: 0,
                enabled,
            },
        }
    }

    /// Current state.
    pub const fn state(&self) -> SequentialPredictorState {
        self.state
    }
}

impl Predictor for SequentialPredictor {
    fn update(&mut self, current_block: u64) {
        self.state.next_block = current_block.saturating_add(1);
    }
}
