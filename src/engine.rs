//! # Engine — Range and Primality Queries over the Prime Cache
//!
//! `PrimeQueryEngine` is the public face of the crate. It validates and
//! normalizes queries, asks the cache to cover whatever bound the configured
//! [`Strategy`] needs, then answers from the cache:
//!
//! | Strategy | Coverage for `[start, end]` | Answer |
//! |----------|-----------------------------|--------|
//! | `FullRange` | `end` | slice of the known primes |
//! | `SqrtTrialDivision` | `isqrt(end)` | trial division of each value |
//!
//! ## Concurrency
//!
//! The engine is `Send + Sync`. The cache lives behind a mutex, so at most one
//! growth phase runs per engine and the mark and prime set are always read and
//! written together. The lock is never held across rayon work: a parallel
//! trial-division filter runs on a copy of the divisor primes taken after
//! coverage, so `generate` may itself be called from rayon tasks. A poisoned
//! lock is recovered: the mark only advances after a completed merge, so the
//! cache is consistent even if a holder panicked.

use rayon::prelude::*;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tracing::debug;

use crate::cache::PrimeCache;
use crate::config::{EngineConfig, Strategy};
use crate::error::{Result, SieveError};
use crate::metrics::{MetricsLog, TimingRecord};
use crate::sieve;

pub struct PrimeQueryEngine {
    config: EngineConfig,
    cache: Mutex<PrimeCache>,
    metrics: Mutex<MetricsLog>,
}

impl Default for PrimeQueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PrimeQueryEngine {
    /// Engine with the default configuration (sqrt-bounded sieve + trial division).
    pub fn new() -> Self {
        Self::build(EngineConfig::default())
    }

    pub fn with_strategy(strategy: Strategy) -> Self {
        Self::build(EngineConfig::with_strategy(strategy))
    }

    pub fn with_config(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: EngineConfig) -> Self {
        PrimeQueryEngine {
            cache: Mutex::new(PrimeCache::with_segment_size(config.segment_size)),
            metrics: Mutex::new(MetricsLog::with_capacity(config.metrics_capacity)),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn lock_cache(&self) -> MutexGuard<'_, PrimeCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_metrics(&self) -> MutexGuard<'_, MetricsLog> {
        self.metrics.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Grow the (already locked) cache to `target` and log the phase, if any.
    fn cover(&self, cache: &mut PrimeCache, target: u64) {
        if let Some(report) = cache.ensure_coverage(target) {
            self.lock_metrics().record_growth(&report);
        }
    }

    /// All primes in the inclusive range between `start` and `end`, ascending.
    ///
    /// The bounds may be given in either order. Fails with
    /// [`SieveError::InvalidRange`] if either bound is below 1.
    pub fn generate(&self, start: i64, end: i64) -> Result<Vec<u64>> {
        if start < 1 || end < 1 {
            return Err(SieveError::InvalidRange { start, end });
        }
        let (low, high) = if start > end {
            (end as u64, start as u64)
        } else {
            (start as u64, end as u64)
        };

        let started = Instant::now();
        let primes = match self.config.strategy {
            Strategy::FullRange => {
                let mut cache = self.lock_cache();
                self.cover(&mut cache, high);
                cache.primes_in(low, high).to_vec()
            }
            Strategy::SqrtTrialDivision => {
                let divisors = {
                    let mut cache = self.lock_cache();
                    let root = high.isqrt();
                    self.cover(&mut cache, root);
                    cache.primes_in(2, root).to_vec()
                };
                self.trial_divide_range(&divisors, low, high)
            }
        };
        let elapsed = started.elapsed();

        self.lock_metrics()
            .record_generate(low, high, primes.len() as u64, elapsed);
        debug!(
            start = low,
            end = high,
            found = primes.len(),
            strategy = %self.config.strategy,
            elapsed_us = elapsed.as_micros() as u64,
            "generate"
        );
        Ok(primes)
    }

    /// Keep the values in `[low, high]` with no factor among `divisors`.
    ///
    /// `divisors` must hold every prime up to `isqrt(high)`.
    fn trial_divide_range(&self, divisors: &[u64], low: u64, high: u64) -> Vec<u64> {
        let is_prime = |v: u64| v >= 2 && !sieve::has_known_factor(v, divisors);
        if high - low >= self.config.parallel_threshold {
            (low..=high).into_par_iter().filter(|&v| is_prime(v)).collect()
        } else {
            (low..=high).filter(|&v| is_prime(v)).collect()
        }
    }

    /// True if `value` is prime. Zero and negative values are never prime.
    pub fn is_prime(&self, value: i64) -> bool {
        if value <= 1 {
            return false;
        }
        let value = value as u64;
        if value == 2 || value == 3 {
            return true;
        }

        let mut cache = self.lock_cache();
        match self.config.strategy {
            Strategy::FullRange => {
                self.cover(&mut cache, value);
                cache.contains(value)
            }
            Strategy::SqrtTrialDivision => {
                self.cover(&mut cache, value.isqrt());
                cache.trial_division(value)
            }
        }
    }

    pub fn high_water_mark(&self) -> u64 {
        self.lock_cache().high_water_mark()
    }

    /// Number of growth phases the cache has run.
    pub fn growth_phases(&self) -> u64 {
        self.lock_cache().growth_phases()
    }

    pub fn known_prime_count(&self) -> usize {
        self.lock_cache().len()
    }

    /// Snapshot of the timing records collected so far.
    pub fn metrics(&self) -> Vec<TimingRecord> {
        self.lock_metrics().records().cloned().collect()
    }

    pub fn clear_metrics(&self) {
        self.lock_metrics().clear();
    }
}
