//! Simulated hardware units.
//!
//! This module contains the cache store and the prefetch machinery that the
//! step engine drives.

/// Fully-associative cache store with global LRU victim selection.
pub mod cache;

/// Predictors and the prefetch issuer.
pub mod prefetch;
