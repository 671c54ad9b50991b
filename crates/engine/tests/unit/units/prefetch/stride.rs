//! # Stride Predictor Tests
//!
//! Verifies stride detection and the saturating confidence counter
//! (+10 on a repeated stride, -5 otherwise, clamped to `[0, 100]`).

use prefetchsim_core::units::prefetch::{Predictor, StridePredictor, StridePredictorState};

fn feed(predictor: &mut StridePredictor, blocks: &[u64]) -> Vec<u8> {
    blocks
        .iter()
        .map(|&block| {
            predictor.update(block);
            predictor.state().confidence
        })
        .collect()
}

#[test]
fn starts_cold() {
    assert_eq!(StridePredictor::new().state(), StridePredictorState::default());
}

#[test]
fn first_access_from_block_zero_matches_initial_stride() {
    let mut predictor = StridePredictor::new();
    predictor.update(0);
    assert_eq!(
        predictor.state(),
        StridePredictorState {
            last_address_block: 0,
            stride: 0,
            confidence: 10,
        }
    );
}

#[test]
fn confidence_builds_on_constant_stride() {
    let mut predictor = StridePredictor::new();
    let confidence = feed(&mut predictor, &[0, 3, 6, 9, 12]);
    assert_eq!(confidence, [10, 5, 15, 25, 35]);
    assert_eq!(predictor.state().stride, 3);
    assert_eq!(predictor.state().last_address_block, 12);
}

#[test]
fn confidence_saturates_at_one_hundred() {
    let mut predictor = StridePredictor::new();
    let blocks: Vec<u64> = (0..30).map(|i| i * 2).collect();
    let confidence = feed(&mut predictor, &blocks);
    assert_eq!(*confidence.last().unwrap(), 100);
    assert!(confidence.iter().all(|&c| c <= 100));
}

#[test]
fn confidence_floors_at_zero() {
    let mut predictor = StridePredictor::new();
    let confidence = feed(&mut predictor, &[5, 1, 9, 2, 40, 7]);
    assert_eq!(confidence, [0, 0, 0, 0, 0, 0]);
}

#[test]
fn stride_change_costs_five() {
    let mut predictor = StridePredictor::new();
    let _ = feed(&mut predictor, &[0, 4, 8, 12]);
    assert_eq!(predictor.state().confidence, 25);
    predictor.update(13);
    assert_eq!(predictor.state().confidence, 20);
    assert_eq!(predictor.state().stride, 1);
}

#[test]
fn descending_stride_is_negative() {
    let mut predictor = StridePredictor::new();
    let _ = feed(&mut predictor, &[100, 96, 92]);
    assert_eq!(predictor.state().stride, -4);
}
