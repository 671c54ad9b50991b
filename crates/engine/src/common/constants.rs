//! Engine-wide constants.
//!
//! Tunables that are fixed for every run: predictor confidence arithmetic and
//! the range of the random access pattern.

/// Confidence added when the observed stride repeats.
pub const CONFIDENCE_GAIN: u8 = 10;

/// Confidence removed when the observed stride changes.
pub const CONFIDENCE_PENALTY: u8 = 5;

/// Upper clamp of the stride predictor confidence counter.
pub const CONFIDENCE_MAX: u8 = 100;

/// Exclusive upper bound of block indices drawn by the random access pattern.
pub const RANDOM_BLOCK_RANGE: u64 = 10_000;

/// Number of blocks the stride prefetcher issues per demand miss.
pub const STRIDE_PREFETCH_DEGREE: u64 = 2;

/// Number of blocks the sequential prefetcher issues per demand miss.
pub const SEQUENTIAL_PREFETCH_DEGREE: u64 = 1;

/// Salt mixed into the run seed for the placeholder-tag generator, so that
/// cache noise never consumes draws from the access-stream generator.
pub const PLACEHOLDER_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Largest cache, in lines, a run may allocate.
pub const MAX_LINES: u64 = 1 << 20;

/// Largest stream buffer width, which is also the stream prefetch degree.
pub const MAX_STREAM_WINDOW: u64 = 1 << 12;
