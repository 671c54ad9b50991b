//! Prefetch predictors and issue logic.
//!
//! This module contains the three predictor state machines shown by the
//! lessons and the issuer that installs speculative fills on a demand miss.
//! Only the predictor matching the configured strategy is updated each step;
//! the others keep whatever state they had.

/// Speculative fill computation and installation.
pub mod issuer;

/// Next-block tracker.
pub mod sequential;

/// Fixed-width stream window.
pub mod stream;

/// Stride detector with a confidence counter.
pub mod stride;

use serde::{Deserialize, Serialize};

pub use self::issuer::{IssueReport, PrefetchIssuer};
pub use self::sequential::{SequentialPredictor, SequentialPredictorState};
pub use self::stream::{StreamBuffer, StreamBufferEntry};
pub use self::stride::{StridePredictor, StridePredictorState};

use crate::config::{Configuration, PrefetchType};

/// Trait for predictor state machines.
///
/// Predictors observe the demand block of every step once classification and
/// fills are done.
pub trait Predictor {
    /// Observes the demand block of the current step.
    fn update(&mut self, current_block: u64);
}

/// Point-in-time copy of every predictor's state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictorSnapshot {
    /// Sequential predictor state.
    pub sequential: SequentialPredictorState,
    /// Stride predictor state.
    pub stride: StridePredictorState,
    /// Stream window, nearest block first.
    pub stream: Vec<StreamBufferEntry>,
}

/// The three predictors of a run plus the selector of the active one.
#[derive(Debug, Clone)]
pub struct Predictors {
    active: PrefetchType,
    /// Next-block tracker.
    pub sequential: SequentialPredictor,
    /// Stride detector.
    pub stride: StridePredictor,
    /// Stream window.
    pub stream: StreamBuffer,
}

impl Predictors {
    /// Creates fresh predictors for a configuration.
    pub fn new(config: &Configuration) -> Self {
        Self {
            active: config.prefetch_type,
            sequential: SequentialPredictor::new(config.prefetch_type == PrefetchType::Sequential),
            stride: StridePredictor::new(),
            stream: StreamBuffer::new(config.stream_window_size as usize),
        }
    }

    /// Updates the active predictor only.
    pub fn update(&mut self, current_block: u64) {
        match self.active {
            PrefetchType::None => {}
            PrefetchType::Sequential => self.sequential.update(current_block),
            PrefetchType::Stride => self.stride.update(current_block),
            PrefetchType::Stream => self.stream.update(current_block),
        }
    }

    /// Copies every predictor's state.
    pub fn snapshot(&self) -> PredictorSnapshot {
        PredictorSnapshot {
            sequential: self.sequential.state(),
            stride: self.stride.state(),
            stream: self.stream.entries().to_vec(),
        }
    }
}
