//! Configuration system for the cache simulator.
//!
//! This module defines the immutable per-run configuration. It provides:
//! 1. **Defaults:** Baseline geometry, prefetcher and workload constants.
//! 2. **Enums:** Prefetcher and access-pattern selectors with stable wire names.
//! 3. **Validation:** Eager checks that make the step pipeline infallible.
//!
//! Configuration is supplied as JSON (see [`Configuration::from_json`]) or built
//! in code starting from `Configuration::default()`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::constants::{
    MAX_LINES, MAX_STREAM_WINDOW, RANDOM_BLOCK_RANGE, SEQUENTIAL_PREFETCH_DEGREE,
    STRIDE_PREFETCH_DEGREE,
};
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
///
/// The defaults describe the small four-line cache used by the lessons, so
/// that every eviction is visible in a single table.
mod defaults {
    /// Default cache size in bytes (four 64-byte lines).
    pub const CACHE_SIZE: u64 = 256;

    /// Default cache line size in bytes.
    pub const LINE_SIZE: u64 = 64;

    /// Default stride (in lines) for the stride pattern and stride prefetcher.
    pub const STRIDE_DISTANCE: u64 = 2;

    /// Default stream buffer width (blocks).
    pub const STREAM_WINDOW: u64 = 8;

    /// Default cycle length of the pointer-chase pattern (blocks).
    pub const POINTER_CHASE_LENGTH: u64 = 16;

    /// Default number of steps per run.
    pub const STEP_COUNT: u64 = 32;

    /// Default pseudo-random seed.
    pub const SEED: u64 = 0x5EED;
}

/// Prefetch strategy selector.
///
/// Exactly one predictor is active per run; `None` disables prefetching
/// entirely and is a fully supported configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrefetchType {
    /// No prefetching.
    None,
    /// Fetch the block following each demand miss.
    #[default]
    Sequential,
    /// Fetch two blocks ahead at the configured stride.
    Stride,
    /// Fetch a window of consecutive blocks after each demand miss.
    Stream,
}

impl PrefetchType {
    /// Every selector, in display order.
    pub const ALL: [Self; 4] = [Self::None, Self::Sequential, Self::Stride, Self::Stream];

    /// Stable wire name, shared by JSON and the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Sequential => "sequential",
            Self::Stride => "stride",
            Self::Stream => "stream",
        }
    }
}

impl fmt::Display for PrefetchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrefetchType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownPrefetchType(s.to_owned()))
    }
}

/// Synthetic memory-access pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AccessPattern {
    /// One new line per step: `step * line_size`.
    #[default]
    Sequential,
    /// Uniformly random block in `[0, 10000)`.
    Random,
    /// `step * stride_distance * line_size`.
    Stride,
    /// Bounded cyclic chain: `(step mod pointer_chase_length) * line_size`.
    #[serde(alias = "pointer_chase")]
    PointerChase,
}

impl AccessPattern {
    /// Every pattern, in display order.
    pub const ALL: [Self; 4] = [Self::Sequential, Self::Random, Self::Stride, Self::PointerChase];

    /// Stable wire name, shared by JSON and the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sequential => "sequential",
            Self::Random => "random",
            Self::Stride => "stride",
            Self::PointerChase => "pointerChase",
        }
    }
}

impl fmt::Display for AccessPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccessPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.replace(['-', '_'], "");
        Self::ALL
            .into_iter()
            .find(|pattern| pattern.as_str().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ConfigError::UnknownAccessPattern(s.to_owned()))
    }
}

/// Immutable per-run configuration.
///
/// # Examples
///
/// ```
/// use prefetchsim_core::config::{AccessPattern, Configuration, PrefetchType};
///
/// let json = r#"{
///     "cache_size_bytes": 512,
///     "line_size_bytes": 64,
///     "prefetch_type": "stride",
///     "stride_distance": 3,
///     "access_pattern": "pointerChase",
///     "step_count": 20
/// }"#;
///
/// let config = Configuration::from_json(json).unwrap();
/// assert_eq!(config.num_lines(), 8);
/// assert_eq!(config.prefetch_type, PrefetchType::Stride);
/// assert_eq!(config.access_pattern, AccessPattern::PointerChase);
/// assert_eq!(config.stream_window_size, 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Configuration {
    /// Total cache capacity in bytes.
    pub cache_size_bytes: u64,
    /// Cache line size in bytes; also the block granularity of addresses.
    pub line_size_bytes: u64,
    /// Active prefetch strategy.
    pub prefetch_type: PrefetchType,
    /// Stride in lines, used by the stride pattern and the stride prefetcher.
    pub stride_distance: u64,
    /// Stream buffer width and stream prefetch degree.
    pub stream_window_size: u64,
    /// Generated access pattern.
    pub access_pattern: AccessPattern,
    /// Cycle length of the pointer-chase pattern.
    pub pointer_chase_length: u64,
    /// Number of steps before the run completes.
    pub step_count: u64,
    /// Seed for the random access pattern and placeholder tags.
    pub seed: u64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            cache_size_bytes: defaults::CACHE_SIZE,
            line_size_bytes: defaults::LINE_SIZE,
            prefetch_type: PrefetchType::default(),
            stride_distance: defaults::STRIDE_DISTANCE,
            stream_window_size: defaults::STREAM_WINDOW,
            access_pattern: AccessPattern::default(),
            pointer_chase_length: defaults::POINTER_CHASE_LENGTH,
            step_count: defaults::STEP_COUNT,
            seed: defaults::SEED,
        }
    }
}

impl Configuration {
    /// Parses and validates a JSON configuration document.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown enum names,
    /// or any error reported by [`Configuration::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Configuration::from_json`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Number of cache lines, `cache_size_bytes / line_size_bytes`.
    ///
    /// Only meaningful for a validated configuration.
    pub const fn num_lines(&self) -> usize {
        if self.line_size_bytes == 0 {
            return 0;
        }
        (self.cache_size_bytes / self.line_size_bytes) as usize
    }

    /// Number of blocks the prefetch issuer fetches on each demand miss.
    pub const fn prefetch_degree(&self) -> u64 {
        match self.prefetch_type {
            PrefetchType::None => 0,
            PrefetchType::Sequential => SEQUENTIAL_PREFETCH_DEGREE,
            PrefetchType::Stride => STRIDE_PREFETCH_DEGREE,
            PrefetchType::Stream => self.stream_window_size,
        }
    }

    /// Checks every constraint the engine relies on.
    ///
    /// # Errors
    ///
    /// * [`ConfigError::NonPositive`] for a zero cache size, line size,
    ///   stream window or pointer-chase length.
    /// * [`ConfigError::NonIntegralGeometry`] when the cache is not a whole
    ///   number of lines.
    /// * [`ConfigError::TooLarge`] when the line count or stream window is
    ///   above [`MAX_LINES`] or [`MAX_STREAM_WINDOW`].
    /// * [`ConfigError::AddressOverflow`] when some generated address or
    ///   prefetch target would not fit in 64 bits.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("cache_size_bytes", self.cache_size_bytes),
            ("line_size_bytes", self.line_size_bytes),
            ("stream_window_size", self.stream_window_size),
            ("pointer_chase_length", self.pointer_chase_length),
        ];
        if let Some((field, _)) = positive.into_iter().find(|&(_, value)| value == 0) {
            return Err(ConfigError::NonPositive { field });
        }

        if self.cache_size_bytes % self.line_size_bytes != 0 {
            return Err(ConfigError::NonIntegralGeometry {
                cache_size: self.cache_size_bytes,
                line_size: self.line_size_bytes,
            });
        }

        let bounded = [
            ("lines", self.cache_size_bytes / self.line_size_bytes, MAX_LINES),
            ("stream_window_size", self.stream_window_size, MAX_STREAM_WINDOW),
        ];
        if let Some((field, value, limit)) =
            bounded.into_iter().find(|&(_, value, limit)| value > limit)
        {
            return Err(ConfigError::TooLarge { field, value, limit });
        }

        if self.highest_address().is_none() {
            return Err(ConfigError::AddressOverflow {
                steps: self.step_count,
                stride: self.stride_distance.max(1),
                line_size: self.line_size_bytes,
            });
        }

        Ok(())
    }

    /// Upper bound on any address the run can touch, including prefetch
    /// targets, or `None` if it overflows.
    fn highest_address(&self) -> Option<u64> {
        let stride = self.stride_distance.max(1);
        let demand_blocks = match self.access_pattern {
            AccessPattern::Sequential => self.step_count,
            AccessPattern::Random => RANDOM_BLOCK_RANGE,
            AccessPattern::Stride => self.step_count.checked_mul(stride)?,
            AccessPattern::PointerChase => self.pointer_chase_length,
        };
        let lookahead = match self.prefetch_type {
            PrefetchType::Stride => STRIDE_PREFETCH_DEGREE.checked_mul(stride)?,
            _ => self.prefetch_degree(),
        };
        demand_blocks
            .checked_add(lookahead)?
            .checked_add(1)?
            .checked_mul(self.line_size_bytes)
    }
}
