//! # Address Generator Tests
//!
//! Verifies each access pattern's address formula and the reproducibility of
//! the random pattern.

use prefetchsim_core::config::{AccessPattern, Configuration};
use prefetchsim_core::workload::AddressGenerator;
use rstest::rstest;

fn generator(pattern: AccessPattern, seed: u64) -> AddressGenerator {
    AddressGenerator::new(&Configuration {
        access_pattern: pattern,
        line_size_bytes: 32,
        cache_size_bytes: 128,
        stride_distance: 4,
        pointer_chase_length: 3,
        seed,
        ..Configuration::default()
    })
}

#[rstest]
#[case(AccessPattern::Sequential, [0, 32, 64, 96, 128, 160])]
#[case(AccessPattern::Stride, [0, 128, 256, 384, 512, 640])]
#[case(AccessPattern::PointerChase, [0, 32, 64, 0, 32, 64])]
fn pattern_formulas(#[case] pattern: AccessPattern, #[case] expected: [u64; 6]) {
    let mut workload = generator(pattern, 0);
    let addresses: Vec<u64> = (0..6).map(|step| workload.next(step)).collect();
    assert_eq!(addresses, expected);
}

#[test]
fn block_is_address_over_line_size() {
    let workload = generator(AccessPattern::Sequential, 0);
    assert_eq!(workload.block_of(0), 0);
    assert_eq!(workload.block_of(31), 0);
    assert_eq!(workload.block_of(32), 1);
    assert_eq!(workload.block_of(1000), 31);
}

#[test]
fn random_pattern_is_reproducible_per_seed() {
    let draw = |seed| {
        let mut workload = generator(AccessPattern::Random, seed);
        (0..64).map(|step| workload.next(step)).collect::<Vec<_>>()
    };
    assert_eq!(draw(42), draw(42));
    assert_ne!(draw(42), draw(43));
}

#[test]
fn random_pattern_is_line_aligned_and_bounded() {
    let mut workload = generator(AccessPattern::Random, 7);
    for step in 0..500 {
        let address = workload.next(step);
        assert_eq!(address % 32, 0);
        assert!(address < 10_000 * 32);
    }
}
