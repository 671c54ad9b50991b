//! # Step Pipeline Scenarios
//!
//! End-to-end scenarios on lesson-sized caches: LRU eviction, prefetch hits,
//! the no-prefetch baseline, stride confidence convergence, stream windows
//! and useless-prefetch accounting.

use pretty_assertions::assert_eq;
use prefetchsim_core::StepResult;
use prefetchsim_core::config::{AccessPattern, Configuration, PrefetchType};

use crate::common::{lesson_config, start, LINE};

fn resident(result: &StepResult, block: u64) -> Option<usize> {
    result
        .cache_snapshot
        .iter()
        .position(|line| line.valid && line.tag == block)
}

// ══════════════════════════════════════════════════════════
// 1. LRU eviction
// ══════════════════════════════════════════════════════════

/// Blocks 0..=4 through a four-line cache: block 0 is the oldest and its
/// slot goes to block 4.
#[test]
fn oldest_block_is_evicted() {
    let mut run = start(lesson_config(PrefetchType::None, AccessPattern::Sequential));
    let results: Vec<StepResult> = run.run_n(5).collect();
    let last = &results[4];

    assert_eq!(last.block, 4);
    assert!(!last.hit);
    assert_eq!(resident(last, 0), None);
    assert_eq!(resident(last, 4), Some(0));
    for block in 1..=3 {
        assert_eq!(resident(last, block), Some(block as usize));
    }
}

// ══════════════════════════════════════════════════════════
// 2. Sequential prefetch
// ══════════════════════════════════════════════════════════

#[test]
fn sequential_prefetch_turns_next_access_into_hit() {
    let mut run = start(lesson_config(PrefetchType::Sequential, AccessPattern::Sequential));

    let first = run.step().unwrap();
    assert!(!first.hit);
    assert_eq!(first.prefetched_blocks, [1]);
    let slot = resident(&first, 1).unwrap();
    assert!(first.cache_snapshot[slot].prefetched);
    assert!(!first.cache_snapshot[slot].accessed);

    let second = run.step().unwrap();
    assert_eq!(second.generated_address, LINE);
    assert!(second.hit);
    assert!(second.was_prefetched);
    assert_eq!(second.statistics.prefetch_hits, 1);
    assert_eq!(second.statistics.hits, 1);
    assert_eq!(second.statistics.misses, 1);
}

#[test]
fn sequential_prefetch_halves_misses_on_a_stream() {
    let mut run = start(lesson_config(PrefetchType::Sequential, AccessPattern::Sequential));
    let results = run.run_to_completion();
    let stats = results.last().unwrap().statistics;

    assert_eq!(stats.hits, 5);
    assert_eq!(stats.misses, 5);
    assert_eq!(stats.prefetch_hits, 5);
    assert_eq!(stats.prefetch_misses, 5);
    assert_eq!(stats.useless_prefetches, 0);
    assert_eq!(stats.accuracy, 50.0);
    assert_eq!(stats.coverage, 50.0);
}

#[test]
fn sequential_predictor_tracks_next_block() {
    let mut run = start(lesson_config(PrefetchType::Sequential, AccessPattern::Sequential));
    let results: Vec<StepResult> = run.run_n(3).collect();
    assert_eq!(results[2].predictor_snapshot.sequential.next_block, 3);
    assert!(results[2].predictor_snapshot.sequential.enabled);
}

// ══════════════════════════════════════════════════════════
// 3. No-prefetch baseline
// ══════════════════════════════════════════════════════════

#[test]
fn baseline_misses_every_access_of_a_long_stream() {
    let mut run = start(lesson_config(PrefetchType::None, AccessPattern::Sequential));
    let results = run.run_to_completion();

    assert_eq!(results.len(), 10);
    for result in &results {
        assert!(!result.hit);
        assert!(result.prefetched_blocks.is_empty());
        assert_eq!(result.statistics.prefetch_hits, 0);
        assert_eq!(result.statistics.prefetch_misses, 0);
    }
    let stats = results.last().unwrap().statistics;
    assert_eq!(stats.misses, 10);
    assert_eq!(stats.accuracy, 0.0);
}

#[test]
fn baseline_leaves_predictors_untouched() {
    let mut run = start(lesson_config(PrefetchType::None, AccessPattern::Stride));
    let initial = run.predictor_snapshot();
    let results = run.run_to_completion();
    assert_eq!(results.last().unwrap().predictor_snapshot, initial);
}

// ══════════════════════════════════════════════════════════
// 4. Stride prefetch
// ══════════════════════════════════════════════════════════

#[test]
fn stride_confidence_converges_to_one_hundred() {
    let mut run = start(Configuration {
        prefetch_type: PrefetchType::Stride,
        access_pattern: AccessPattern::Stride,
        stride_distance: 3,
        step_count: 16,
        ..lesson_config(PrefetchType::Stride, AccessPattern::Stride)
    });
    let results = run.run_to_completion();
    let confidence: Vec<u8> = results
        .iter()
        .map(|result| result.predictor_snapshot.stride.confidence)
        .collect();

    assert_eq!(results[1].predictor_snapshot.stride.stride, 3);
    assert!(confidence[1..].windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(*confidence.last().unwrap(), 100);
}

#[test]
fn stride_prefetch_fetches_two_strides_ahead() {
    let mut run = start(Configuration {
        cache_size_bytes: 8 * LINE,
        stride_distance: 3,
        ..lesson_config(PrefetchType::Stride, AccessPattern::Stride)
    });

    let first = run.step().unwrap();
    assert_eq!(first.prefetched_blocks, [3, 6]);

    let second = run.step().unwrap();
    assert_eq!(second.block, 3);
    assert!(second.hit && second.was_prefetched);

    let third = run.step().unwrap();
    assert_eq!(third.block, 6);
    assert!(third.hit && third.was_prefetched);

    let fourth = run.step().unwrap();
    assert_eq!(fourth.block, 9);
    assert!(!fourth.hit);
    assert_eq!(fourth.prefetched_blocks, [12, 15]);
}

// ══════════════════════════════════════════════════════════
// 5. Stream prefetch
// ══════════════════════════════════════════════════════════

#[test]
fn stream_prefetch_fills_the_window() {
    let mut run = start(Configuration {
        cache_size_bytes: 8 * LINE,
        stream_window_size: 4,
        ..lesson_config(PrefetchType::Stream, AccessPattern::Sequential)
    });

    let first = run.step().unwrap();
    assert_eq!(first.prefetched_blocks, [1, 2, 3, 4]);
    let window: Vec<u64> = first
        .predictor_snapshot
        .stream
        .iter()
        .map(|entry| entry.address)
        .collect();
    assert_eq!(window, [0, 1, 2, 3]);

    let second = run.step().unwrap();
    assert!(second.hit && second.was_prefetched);
    assert_eq!(second.predictor_snapshot.stream[0].address, 1);
    assert!(second.predictor_snapshot.stream.iter().all(|e| e.valid && !e.accessed));
}

// ══════════════════════════════════════════════════════════
// 6. Useless prefetches
// ══════════════════════════════════════════════════════════

/// Sequential prefetch on a stride-2 stream never uses its fills; once the
/// cache is full each new fill displaces an unused one.
#[test]
fn unused_fills_are_counted_when_displaced() {
    let mut run = start(Configuration {
        stride_distance: 2,
        ..lesson_config(PrefetchType::Sequential, AccessPattern::Stride)
    });
    let results: Vec<StepResult> = run.run_n(4).collect();

    let useless: Vec<u64> = results.iter().map(|r| r.useless_reclaimed).collect();
    assert_eq!(useless, [0, 0, 1, 1]);

    let stats = results[3].statistics;
    assert_eq!(stats.useless_prefetches, 2);
    assert_eq!(stats.prefetch_misses, 4);
    assert_eq!(stats.prefetch_hits, 0);
    assert_eq!(stats.coverage, 0.0);
}

// ══════════════════════════════════════════════════════════
// 7. Pointer chase
// ══════════════════════════════════════════════════════════

#[test]
fn pointer_chase_within_capacity_hits_after_warmup() {
    let mut run = start(Configuration {
        pointer_chase_length: 3,
        ..lesson_config(PrefetchType::None, AccessPattern::PointerChase)
    });
    let results = run.run_to_completion();
    let hits: Vec<bool> = results.iter().map(|r| r.hit).collect();
    assert_eq!(
        hits,
        [false, false, false, true, true, true, true, true, true, true]
    );
}
