//! Time-bounded load history.
//!
//! Samples are kept in arrival order, which is also timestamp order. Eviction
//! happens on every insert and is measured against the newly inserted
//! sample's timestamp rather than the wall clock, so behaviour is identical
//! under a simulated clock.

use std::collections::VecDeque;

use chrono::Duration;
use serde::Serialize;

use crate::types::{LoadValue, Timestamp};

/// A single normalized load reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub value: LoadValue,
    pub timestamp: Timestamp,
}

impl Sample {
    pub fn new(value: LoadValue, timestamp: Timestamp) -> Self {
        Self { value, timestamp }
    }
}

/// Ordered samples no older than the retention window.
#[derive(Debug, Clone)]
pub struct LoadHistory {
    samples: VecDeque<Sample>,
    retention: Duration,
}

impl LoadHistory {
    pub fn new(retention: Duration) -> Self {
        Self {
            samples: VecDeque::new(),
            retention,
        }
    }

    /// Append `sample` and evict everything aged `>= retention` relative to it.
    ///
    /// The caller guarantees `sample` is not older than [`Self::latest`].
    /// Returns the number of evicted samples.
    pub fn record(&mut self, sample: Sample) -> usize {
        self.samples.push_back(sample);

        let newest = sample.timestamp;
        let mut evicted = 0;
        while let Some(oldest) = self.samples.front() {
            if newest - oldest.timestamp < self.retention {
                break;
            }
            self.samples.pop_front();
            evicted += 1;
        }
        evicted
    }

    /// Most recently recorded sample.
    pub fn latest(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Owned copy of the retained samples, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        self.samples.iter().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn keeps_samples_inside_window() {
        let mut history = LoadHistory::new(Duration::minutes(10));
        for minute in 0..10 {
            history.record(Sample::new(0.5, t0() + Duration::minutes(minute)));
        }
        assert_eq!(history.len(), 10);
    }

    #[test]
    fn evicts_exactly_at_retention_boundary() {
        let mut history = LoadHistory::new(Duration::minutes(10));
        history.record(Sample::new(0.1, t0()));
        history.record(Sample::new(0.2, t0() + Duration::seconds(1)));

        let evicted = history.record(Sample::new(0.3, t0() + Duration::minutes(10)));

        assert_eq!(evicted, 1);
        let values: Vec<_> = history.snapshot().iter().map(|s| s.value).collect();
        assert_eq!(values, vec![0.2, 0.3]);
    }

    #[test]
    fn stale_sample_is_evicted_by_fresh_one() {
        let mut history = LoadHistory::new(Duration::minutes(10));
        let latest = t0() + Duration::minutes(11);
        history.record(Sample::new(0.4, t0()));
        history.record(Sample::new(0.6, latest));

        assert_eq!(history.len(), 1);
        assert_eq!(history.latest().map(|s| s.timestamp), Some(latest));
    }

    #[test]
    fn equal_timestamps_are_retained() {
        let mut history = LoadHistory::new(Duration::minutes(10));
        history.record(Sample::new(0.4, t0()));
        history.record(Sample::new(0.5, t0()));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn snapshot_is_a_copy() {
        let mut history = LoadHistory::new(Duration::minutes(10));
        history.record(Sample::new(0.4, t0()));

        let mut snapshot = history.snapshot();
        snapshot.clear();

        assert_eq!(history.len(), 1);
    }

    #[test]
    fn never_holds_sample_older_than_retention() {
        let retention = Duration::minutes(10);
        let mut history = LoadHistory::new(retention);
        let mut now = t0();
        for step in 0..200 {
            now += Duration::seconds(7 + (step % 13) * 11);
            history.record(Sample::new(0.5, now));
            let newest = history.latest().unwrap().timestamp;
            assert!(history
                .snapshot()
                .iter()
                .all(|s| newest - s.timestamp < retention));
        }
    }
}
