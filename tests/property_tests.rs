//! Property-based tests for sievecache's query engine.
//!
//! These tests use the `proptest` framework to check invariants across
//! randomly generated ranges and query sequences, comparing every answer with
//! a naive trial-division oracle.
//!
//! # How to run
//!
//! ```bash
//! cargo test --test property_tests
//!
//! # Increase case count for thorough testing (default is 256):
//! PROPTEST_CASES=10000 cargo test --test property_tests
//! ```
//!
//! # Testing strategy
//!
//! - **Order independence**: `generate(a, b) == generate(b, a)`
//! - **Correctness**: range output and `is_prime` match the oracle
//! - **Amortization**: repeating a query never adds a growth phase
//! - **History independence**: answers do not depend on earlier queries
//!
//! Each property is named `prop_<operation>_<invariant>`.

mod common;

use common::naive_is_prime;
use proptest::prelude::*;
use sievecache::{EngineConfig, PrimeQueryEngine, Strategy as SieveStrategy};

fn strategy() -> impl Strategy<Value = SieveStrategy> {
    prop_oneof![Just(SieveStrategy::FullRange), Just(SieveStrategy::SqrtTrialDivision)]
}

proptest! {
    /// **Property**: the inclusive range is order-independent.
    #[test]
    fn prop_generate_order_independent(
        a in 1i64..20_000,
        b in 1i64..20_000,
        strat in strategy(),
    ) {
        let forward = PrimeQueryEngine::with_strategy(strat);
        let backward = PrimeQueryEngine::with_strategy(strat);
        prop_assert_eq!(forward.generate(a, b).unwrap(), backward.generate(b, a).unwrap());
    }

    /// **Property**: `generate` returns exactly the oracle's primes, ascending.
    #[test]
    fn prop_generate_matches_oracle(
        a in 1u64..50_000,
        width in 0u64..2_000,
        strat in strategy(),
    ) {
        let engine = PrimeQueryEngine::with_strategy(strat);
        let b = a + width;
        let got = engine.generate(a as i64, b as i64).unwrap();
        let want: Vec<u64> = (a..=b).filter(|&n| naive_is_prime(n)).collect();
        prop_assert_eq!(got, want);
    }

    /// **Property**: `is_prime(n)` is true iff n has no non-trivial divisor;
    /// everything `<= 1` (including negatives) is false.
    #[test]
    fn prop_is_prime_matches_oracle(n in -1_000i64..200_000, strat in strategy()) {
        let engine = PrimeQueryEngine::with_strategy(strat);
        let expected = n >= 2 && naive_is_prime(n as u64);
        prop_assert_eq!(engine.is_prime(n), expected, "is_prime({})", n);
    }

    /// **Property**: a repeated `generate(1, N)` is identical and runs no new
    /// growth phase.
    #[test]
    fn prop_generate_repeat_is_amortized(n in 1i64..100_000, strat in strategy()) {
        let engine = PrimeQueryEngine::with_strategy(strat);
        let first = engine.generate(1, n).unwrap();
        let phases = engine.growth_phases();
        let second = engine.generate(1, n).unwrap();
        prop_assert_eq!(first, second);
        prop_assert_eq!(engine.growth_phases(), phases);
    }

    /// **Property**: with the full-range strategy the mark equals the largest
    /// end seen, and earlier results are a subset of later, wider results.
    #[test]
    fn prop_full_range_growth_is_monotonic(
        n in 2i64..20_000,
        extra in 1i64..20_000,
    ) {
        let engine = PrimeQueryEngine::with_strategy(SieveStrategy::FullRange);
        let m = n + extra;
        let small = engine.generate(1, n).unwrap();
        let large = engine.generate(1, m).unwrap();
        prop_assert_eq!(engine.high_water_mark(), m as u64);
        prop_assert!(small.len() <= large.len());
        prop_assert_eq!(&large[..small.len()], small.as_slice());
    }

    /// **Property**: a sequence of queries in arbitrary order gives the same
    /// answers as a fresh engine per query, with tiny growth segments.
    #[test]
    fn prop_answers_independent_of_history(
        queries in proptest::collection::vec((1i64..5_000, 1i64..5_000), 1..8),
        strat in strategy(),
    ) {
        let shared = PrimeQueryEngine::with_config(EngineConfig {
            strategy: strat,
            segment_size: 16,
            ..EngineConfig::default()
        }).unwrap();
        for (a, b) in queries {
            let fresh = PrimeQueryEngine::with_strategy(strat);
            prop_assert_eq!(shared.generate(a, b).unwrap(), fresh.generate(a, b).unwrap());
        }
    }

    /// **Property**: any range with a bound below 1 is rejected.
    #[test]
    fn prop_generate_rejects_non_positive(
        a in -10_000i64..1,
        b in -10_000i64..10_000,
    ) {
        let engine = PrimeQueryEngine::new();
        prop_assert!(engine.generate(a, b).is_err());
        prop_assert!(engine.generate(b, a).is_err());
    }
}
