//! # Metrics — Structured Timing Records
//!
//! Every growth phase and every `generate` call leaves a `TimingRecord` in
//! the engine's `MetricsLog`. Records are plain data: callers read them
//! through the engine accessor, serialize them with serde, or render them with
//! `Display` (the interactive session does the latter).
//!
//! | Kind | Range | `values_tested` | `primes_found` |
//! |------|-------|-----------------|----------------|
//! | `Growth` | `(previous mark, new mark]` | new territory | primes added to the cache |
//! | `Generate` | `[start, end]` after normalization | range width | primes returned |
//!
//! The log is bounded: once it holds `capacity` records, the oldest is dropped
//! for each new one. Sequence numbers keep counting across evictions and
//! `clear`, so `seq` identifies a record for the life of the engine.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use crate::cache::GrowthReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Growth,
    Generate,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::Growth => write!(f, "growth"),
            OperationKind::Generate => write!(f, "generate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingRecord {
    /// 1-based sequence number, assigned in record order.
    pub seq: u64,
    pub kind: OperationKind,
    pub low: u64,
    pub high: u64,
    pub values_tested: u64,
    pub primes_found: u64,
    pub duration: Duration,
}

impl fmt::Display for TimingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ms = self.duration.as_secs_f64() * 1000.0;
        match self.kind {
            OperationKind::Growth => write!(
                f,
                "M{}: [{:.3}ms] sieved {} values (range: {} - {}), found {} primes",
                self.seq, ms, self.values_tested, self.low, self.high, self.primes_found
            ),
            OperationKind::Generate => write!(
                f,
                "M{}: [{:.3}ms] generate({}, {}) identified {} primes",
                self.seq, ms, self.low, self.high, self.primes_found
            ),
        }
    }
}

/// Default number of records retained by a `MetricsLog`.
pub const DEFAULT_METRICS_CAPACITY: usize = 1000;

/// Bounded, oldest-first list of timing records.
#[derive(Debug, Clone)]
pub struct MetricsLog {
    records: VecDeque<TimingRecord>,
    capacity: usize,
    next_seq: u64,
}

impl Default for MetricsLog {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsLog {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_METRICS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MetricsLog {
            records: VecDeque::with_capacity(capacity.min(DEFAULT_METRICS_CAPACITY)),
            capacity,
            next_seq: 1,
        }
    }

    fn push(
        &mut self,
        kind: OperationKind,
        low: u64,
        high: u64,
        values_tested: u64,
        primes_found: u64,
        duration: Duration,
    ) {
        if self.len() >= self.capacity {
            self.records.pop_front();
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.records.push_back(TimingRecord {
            seq,
            kind,
            low,
            high,
            values_tested,
            primes_found,
            duration,
        });
    }

    pub fn record_growth(&mut self, report: &GrowthReport) {
        self.push(
            OperationKind::Growth,
            report.low,
            report.high,
            report.values_tested,
            report.primes_found,
            report.duration,
        );
    }

    pub fn record_generate(&mut self, low: u64, high: u64, primes_found: u64, duration: Duration) {
        self.push(
            OperationKind::Generate,
            low,
            high,
            high - low + 1,
            primes_found,
            duration,
        );
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &TimingRecord> + '_ {
        self.records.iter()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn growth(low: u64, high: u64, found: u64) -> GrowthReport {
        GrowthReport {
            low,
            high,
            values_tested: high - low,
            primes_found: found,
            duration: Duration::from_micros(1500),
        }
    }

    #[test]
    fn records_are_numbered_from_one() {
        let mut log = MetricsLog::new();
        log.record_growth(&growth(1, 10, 4));
        log.record_generate(1, 10, 4, Duration::from_millis(2));
        let seqs: Vec<u64> = log.records().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![1, 2]);
    }

    #[test]
    fn generate_record_counts_inclusive_width() {
        let mut log = MetricsLog::new();
        log.record_generate(7900, 7920, 3, Duration::ZERO);
        let r = log.records().next().unwrap();
        assert_eq!(r.kind, OperationKind::Generate);
        assert_eq!(r.values_tested, 21);
        assert_eq!(r.primes_found, 3);
    }

    #[test]
    fn full_log_evicts_oldest_and_keeps_counting() {
        let mut log = MetricsLog::with_capacity(3);
        for i in 1..=5 {
            log.record_generate(1, i, 0, Duration::ZERO);
        }
        assert_eq!(log.len(), 3);
        let seqs: Vec<u64> = log.records().map(|r| r.seq).collect();
        assert_eq!(seqs, vec![3, 4, 5]);
        assert_eq!(log.records().next().unwrap().high, 3);
    }

    #[test]
    fn zero_capacity_is_clamped() {
        let mut log = MetricsLog::with_capacity(0);
        log.record_growth(&growth(1, 10, 4));
        log.record_growth(&growth(10, 20, 4));
        assert_eq!(log.capacity(), 1);
        assert_eq!(log.records().next().unwrap().seq, 2);
    }

    #[test]
    fn display_formats() {
        let mut log = MetricsLog::new();
        log.record_growth(&growth(1, 101, 26));
        log.record_generate(1, 101, 26, Duration::from_millis(3));
        let lines: Vec<String> = log.records().map(|r| r.to_string()).collect();
        assert_eq!(
            lines[0],
            "M1: [1.500ms] sieved 100 values (range: 1 - 101), found 26 primes"
        );
        assert_eq!(lines[1], "M2: [3.000ms] generate(1, 101) identified 26 primes");
    }

    #[test]
    fn serializes_kind_as_snake_case() {
        let mut log = MetricsLog::new();
        log.record_generate(11, 11, 1, Duration::ZERO);
        let json = serde_json::to_value(log.records().next().unwrap()).unwrap();
        assert_eq!(json["kind"], "generate");
        assert_eq!(json["low"], 11);
        assert_eq!(json["primes_found"], 1);
    }

    #[test]
    fn clear_empties_log() {
        let mut log = MetricsLog::new();
        log.record_generate(1, 2, 1, Duration::ZERO);
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.len(), 0);
        log.record_generate(1, 2, 1, Duration::ZERO);
        assert_eq!(log.records().next().unwrap().seq, 2);
    }
}
