//! Configuration error definitions.
//!
//! This module defines the single fallible surface of the engine. It provides:
//! 1. **Geometry errors:** Non-positive, non-integral or oversized cache/line sizes.
//! 2. **Enum errors:** Unknown prefetcher or access-pattern names.
//! 3. **Input errors:** JSON parse failures and unreadable configuration files.
//!
//! Everything past `RunHandle::configure` is infallible for a validated
//! configuration; invariant violations inside the pipeline panic instead.

use thiserror::Error;

/// Errors raised while building or validating a [`Configuration`](crate::config::Configuration).
///
/// These are fatal for the run being configured: no engine state exists until
/// the caller supplies a configuration that passes validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size or length field was zero.
    ///
    /// The associated value names the offending configuration field.
    #[error("`{field}` must be positive")]
    NonPositive {
        /// Name of the configuration field.
        field: &'static str,
    },

    /// The cache size is not a whole number of lines.
    #[error("cache size {cache_size} B is not a multiple of line size {line_size} B")]
    NonIntegralGeometry {
        /// Configured cache size in bytes.
        cache_size: u64,
        /// Configured line size in bytes.
        line_size: u64,
    },

    /// The prefetcher name is not one of `none`, `sequential`, `stride`, `stream`.
    #[error("unknown prefetch type `{0}`")]
    UnknownPrefetchType(String),

    /// The access pattern name is not one of `sequential`, `random`, `stride`, `pointerChase`.
    #[error("unknown access pattern `{0}`")]
    UnknownAccessPattern(String),

    /// A size field exceeds what the engine will allocate for one run.
    #[error("`{field}` of {value} exceeds the limit of {limit}")]
    TooLarge {
        /// Name of the limited quantity.
        field: &'static str,
        /// Requested value.
        value: u64,
        /// Largest accepted value.
        limit: u64,
    },

    /// The run would generate an address that does not fit in 64 bits.
    #[error("largest generated address overflows u64 ({steps} steps x stride {stride} x {line_size} B)")]
    AddressOverflow {
        /// Configured step count.
        steps: u64,
        /// Effective stride in lines.
        stride: u64,
        /// Configured line size in bytes.
        line_size: u64,
    },

    /// The configuration document is not valid JSON for [`Configuration`](crate::config::Configuration).
    #[error("invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("cannot read configuration: {0}")]
    Io(#[from] std::io::Error),
}
