//! Run control.
//!
//! A [`RunHandle`] is the caller-owned session for one simulation. It
//! validates its configuration once, then hands out steps one at a time,
//! as a lazy finite iterator, or paced through a callback that may be
//! cancelled between steps. Nothing is shared between handles.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use super::engine::{StepEngine, StepResult};
use crate::common::error::ConfigError;
use crate::config::Configuration;
use crate::stats::Statistics;
use crate::units::cache::CacheLine;
use crate::units::prefetch::PredictorSnapshot;

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    /// Configured or reset; no step taken yet.
    #[default]
    Idle,
    /// At least one step taken and steps remain.
    Running,
    /// `step_count` steps taken.
    Completed,
}

/// Cooperative stop signal checked between steps.
///
/// Clones share the same flag, so a token can be raised from another thread
/// while a paced run is in progress.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates a lowered token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests a stop before the next step.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    /// Returns true once [`CancelToken::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Outcome of [`RunHandle::run_paced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacedRun {
    /// Steps executed by this call.
    pub steps: u64,
    /// Whether the token stopped the call early.
    pub cancelled: bool,
}

/// Caller-owned simulation session.
#[derive(Debug, Clone)]
pub struct RunHandle {
    config: Configuration,
    engine: StepEngine,
    state: RunState,
    next_step: u64,
}

impl RunHandle {
    /// Validates `config` and prepares a fresh run.
    ///
    /// # Errors
    ///
    /// Returns any [`ConfigError`] reported by [`Configuration::validate`];
    /// no run state is created in that case.
    pub fn configure(config: Configuration) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            lines = config.num_lines(),
            line_size = config.line_size_bytes,
            prefetch = %config.prefetch_type,
            pattern = %config.access_pattern,
            steps = config.step_count,
            "run configured"
        );
        let engine = StepEngine::new(&config);
        Ok(Self {
            config,
            engine,
            state: RunState::Idle,
            next_step: 0,
        })
    }

    /// Configuration of this run.
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> RunState {
        self.state
    }

    /// Steps executed since configuration or the last reset.
    pub const fn steps_taken(&self) -> u64 {
        self.next_step
    }

    /// Statistics accumulated so far.
    pub const fn statistics(&self) -> &Statistics {
        self.engine.statistics()
    }

    /// Current cache lines, ordered by id.
    pub fn cache_lines(&self) -> &[CacheLine] {
        self.engine.store().lines()
    }

    /// Current predictor states.
    pub fn predictor_snapshot(&self) -> PredictorSnapshot {
        self.engine.predictors().snapshot()
    }

    /// Executes the next step, or returns `None` once the run is complete.
    pub fn step(&mut self) -> Option<StepResult> {
        if self.next_step >= self.config.step_count {
            self.state = RunState::Completed;
            return None;
        }

        let result = self.engine.step(self.next_step);
        self.next_step += 1;
        self.state = if self.next_step >= self.config.step_count {
            info!(steps = self.next_step, accuracy = result.statistics.accuracy, "run completed");
            RunState::Completed
        } else {
            RunState::Running
        };
        Some(result)
    }

    /// Lazily yields up to `n` further steps.
    ///
    /// Dropping the iterator early leaves the run at the last yielded step.
    pub fn run_n(&mut self, n: u64) -> Steps<'_> {
        Steps {
            run: self,
            remaining: n,
        }
    }

    /// Executes every remaining step.
    pub fn run_to_completion(&mut self) -> Vec<StepResult> {
        let remaining = self.config.step_count.saturating_sub(self.next_step);
        self.run_n(remaining).collect()
    }

    /// Executes up to `n` steps, calling `pace` after each one.
    ///
    /// `cancel` is checked before every step. `pace` is the caller's
    /// suspension point (for example a display delay) and has no effect on
    /// the simulated state.
    pub fn run_paced<F>(&mut self, n: u64, cancel: &CancelToken, mut pace: F) -> PacedRun
    where
        F: FnMut(&StepResult),
    {
        let mut steps = 0;
        while steps < n {
            if cancel.is_cancelled() {
                info!(steps_taken = self.next_step, "run cancelled");
                return PacedRun {
                    steps,
                    cancelled: true,
                };
            }
            let Some(result) = self.step() else {
                break;
            };
            steps += 1;
            pace(&result);
        }
        PacedRun {
            steps,
            cancelled: false,
        }
    }

    /// Discards all run state and rebuilds it from the current configuration.
    pub fn reset(&mut self) {
        self.engine = StepEngine::new(&self.config);
        self.state = RunState::Idle;
        self.next_step = 0;
        info!("run reset");
    }

    /// Validates `config`, then resets onto it.
    ///
    /// # Errors
    ///
    /// Returns the validation error and leaves the current run untouched.
    pub fn reconfigure(&mut self, config: Configuration) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        self.reset();
        Ok(())
    }
}

/// Lazy, finite sequence of steps returned by [`RunHandle::run_n`].
#[derive(Debug)]
pub struct Steps<'a> {
    run: &'a mut RunHandle,
    remaining: u64,
}

impl Iterator for Steps<'_> {
    type Item = StepResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.run.step()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self
            .run
            .config
            .step_count
            .saturating_sub(self.run.next_step)
            .min(self.remaining);
        (left as usize, Some(left as usize))
    }
}
