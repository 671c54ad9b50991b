//! Simulation driver.
//!
//! The step engine owns the per-run state and executes single accesses; the
//! run handle wraps it with lifecycle, iteration and cancellation.

/// Per-step pipeline.
pub mod engine;

/// Caller-facing run control.
pub mod run;

pub use self::engine::{StepEngine, StepResult};
pub use self::run::{CancelToken, PacedRun, RunHandle, RunState, Steps};
