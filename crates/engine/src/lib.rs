//! Cache-line simulation and prefetch engine.
//!
//! This crate models a single-level, fully-associative cache driven by a
//! synthetic access stream, with pluggable prefetch strategies:
//! 1. **Workload:** Sequential, random, strided and pointer-chase address streams.
//! 2. **Cache:** Fixed line array with global LRU victim selection.
//! 3. **Prefetch:** Sequential, stride (with confidence) and stream-window predictors.
//! 4. **Statistics:** Hit, miss and prefetch counters with accuracy and coverage.
//! 5. **Simulation:** Step engine and caller-owned run handles.
//!
//! A run is fully determined by its [`Configuration`], including the seed of
//! the random access pattern.

/// Common types and constants (errors, predictor arithmetic).
pub mod common;
/// Run configuration (defaults, enums, validation).
pub mod config;
/// Step engine and run control.
pub mod sim;
/// Statistics collection and reporting.
pub mod stats;
/// Cache store and prefetch units.
pub mod units;
/// Synthetic address generator.
pub mod workload;

/// Configuration error; the only error a caller can receive.
pub use crate::common::ConfigError;
/// Root configuration type; use `Configuration::default()` or parse JSON.
pub use crate::config::Configuration;
/// Caller-owned simulation session.
pub use crate::sim::{RunHandle, StepResult};
/// Running counters and derived metrics.
pub use crate::stats::Statistics;
