//! Prefetch unit tests.




/// Stride detection and confidence arithmetic.
pub mod stride;
