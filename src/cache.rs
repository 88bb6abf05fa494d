//! # Cache — Incrementally Grown Prime Set
//!
//! `PrimeCache` owns the ordered set of known primes together with the
//! high-water mark up to which that set is exhaustive. Growth is monotonic:
//! a request at or below the mark is a no-op, and a request above it sieves
//! only the new territory `(mark, target]`.
//!
//! ## Segmented Growth
//!
//! A growth phase walks the new territory in segments of at most
//! `segment_size` odd candidates. Primes found in one segment are appended
//! before the next segment is sieved, so every segment sees all primes below
//! its own start. Memory stays bounded by one segment plus the prime list, and
//! the phase still counts as a single growth for metrics and amortization.

use std::time::{Duration, Instant};
use tracing::debug;

use crate::sieve;

/// Initial high-water mark: nothing is proven yet.
pub const INITIAL_MARK: u64 = 1;

/// Ascending, append-only list of primes.
#[derive(Debug, Clone, Default)]
pub struct KnownPrimes {
    primes: Vec<u64>,
}

impl KnownPrimes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a prime larger than every prime already held.
    ///
    /// Out-of-order or duplicate inserts are ignored.
    pub fn insert(&mut self, prime: u64) {
        if self.primes.last().is_none_or(|&last| prime > last) {
            self.primes.push(prime);
        }
    }

    pub fn contains(&self, value: u64) -> bool {
        self.primes.binary_search(&value).is_ok()
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.primes
    }

    /// Primes in the inclusive range `[low, high]`, ascending.
    pub fn range(&self, low: u64, high: u64) -> &[u64] {
        let from = self.primes.partition_point(|&p| p < low);
        let to = self.primes.partition_point(|&p| p <= high);
        if from >= to {
            &[]
        } else {
            &self.primes[from..to]
        }
    }
}

impl Extend<u64> for KnownPrimes {
    fn extend<I: IntoIterator<Item = u64>>(&mut self, iter: I) {
        for p in iter {
            self.insert(p);
        }
    }
}

/// Summary of one growth phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthReport {
    /// Previous high-water mark (exclusive lower bound of the phase).
    pub low: u64,
    /// New high-water mark (inclusive upper bound of the phase).
    pub high: u64,
    pub values_tested: u64,
    pub primes_found: u64,
    pub duration: Duration,
}

#[derive(Debug, Clone)]
pub struct PrimeCache {
    known: KnownPrimes,
    calculated_up_to: u64,
    segment_size: usize,
    growth_phases: u64,
}

impl PrimeCache {
    /// Default number of odd candidates per growth segment (8 MiB of bits).
    pub const DEFAULT_SEGMENT_SIZE: usize = 1 << 26;

    pub fn new() -> Self {
        Self::with_segment_size(Self::DEFAULT_SEGMENT_SIZE)
    }

    pub fn with_segment_size(segment_size: usize) -> Self {
        PrimeCache {
            known: KnownPrimes::new(),
            calculated_up_to: INITIAL_MARK,
            segment_size: segment_size.max(1),
            growth_phases: 0,
        }
    }

    pub fn high_water_mark(&self) -> u64 {
        self.calculated_up_to
    }

    pub fn growth_phases(&self) -> u64 {
        self.growth_phases
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    pub fn primes(&self) -> &[u64] {
        self.known.as_slice()
    }

    /// Known primes in `[low, high]`. Exhaustive only when `high` is within
    /// the high-water mark.
    pub fn primes_in(&self, low: u64, high: u64) -> &[u64] {
        self.known.range(low, high)
    }

    /// Make the known prime set exhaustive up to `target`.
    ///
    /// Returns `None` when the mark already covers `target`; otherwise sieves
    /// `(mark, target]`, advances the mark to `target` and reports the phase.
    pub fn ensure_coverage(&mut self, target: u64) -> Option<GrowthReport> {
        if target <= self.calculated_up_to {
            return None;
        }

        let started = Instant::now();
        let low = self.calculated_up_to;
        let before = self.known.len();

        if low == INITIAL_MARK {
            // 2 is the only even prime; the windows only hold odd candidates
            self.known.insert(2);
        }

        let span = 2 * self.segment_size as u64;
        let mut seg_low = low;
        while seg_low < target {
            let seg_high = seg_low.saturating_add(span).min(target);
            let found = sieve::sieve_window(self.known.as_slice(), seg_low, seg_high);
            self.known.extend(found);
            seg_low = seg_high;
        }

        self.calculated_up_to = target;
        self.growth_phases += 1;

        let report = GrowthReport {
            low,
            high: target,
            values_tested: target - low,
            primes_found: (self.known.len() - before) as u64,
            duration: started.elapsed(),
        };
        debug!(
            low = report.low,
            high = report.high,
            primes_found = report.primes_found,
            total_known = self.known.len(),
            elapsed_us = report.duration.as_micros() as u64,
            "sieve growth phase"
        );
        Some(report)
    }

    /// Membership test against the known primes.
    ///
    /// The caller must have covered `value` with [`ensure_coverage`] first.
    ///
    /// [`ensure_coverage`]: PrimeCache::ensure_coverage
    pub fn contains(&self, value: u64) -> bool {
        debug_assert!(
            value <= self.calculated_up_to,
            "contains({}) above high-water mark {}",
            value,
            self.calculated_up_to
        );
        self.known.contains(value)
    }

    /// Trial-divide `value` by the known primes.
    ///
    /// Correct when the mark is at least `isqrt(value)`.
    pub fn trial_division(&self, value: u64) -> bool {
        value >= 2 && !sieve::has_known_factor(value, self.known.as_slice())
    }
}

impl Default for PrimeCache {
    fn default() -> Self {
        Self::new()
    }
}
