//! Common types and constants shared by every engine component.
//!
//! This module provides:
//! 1. **Constants:** Predictor arithmetic and generator ranges.
//! 2. **Error Handling:** The configuration error taxonomy.

/// Engine-wide constants.
pub mod constants;

/// Configuration error type.
pub mod error;

pub use error::ConfigError;
