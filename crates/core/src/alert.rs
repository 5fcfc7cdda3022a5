//! Alert record types for sustained high-load and recovery periods.

use serde::Serialize;

use crate::types::Timestamp;

/// Which of the two alert ledgers a period belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Load stayed above the high-load threshold for the debounce window.
    HighLoad,
    /// Load stayed below the recovery threshold for the debounce window.
    Recovery,
}

/// A confirmed alert period.
///
/// `end_time` is `None` while the period is still open, i.e. the opposing
/// regime has not been confirmed yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPeriod {
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
}

impl AlertPeriod {
    /// Create a period that has not ended yet.
    pub fn open(start_time: Timestamp) -> Self {
        Self {
            start_time,
            end_time: None,
        }
    }

    /// Create a period that is already closed.
    pub fn closed(start_time: Timestamp, end_time: Timestamp) -> Self {
        Self {
            start_time,
            end_time: Some(end_time.max(start_time)),
        }
    }

    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }

    /// Length of a closed period, or `None` while it is open.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end_time.map(|end| end - self.start_time)
    }
}

/// Point-in-time copy of the alert ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertSummary {
    pub high_load_alerts: Vec<AlertPeriod>,
    pub recovery_alerts: Vec<AlertPeriod>,
    /// Number of confirmed transitions into high load.
    pub high_load_count: u64,
    /// Number of confirmed recoveries from high load.
    pub recovery_count: u64,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;

    #[test]
    fn closed_period_never_ends_before_it_starts() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let period = AlertPeriod::closed(start, start - Duration::seconds(5));
        assert_eq!(period.end_time, Some(start));
        assert_eq!(period.duration(), Some(Duration::zero()));
    }

    #[test]
    fn open_period_has_no_duration() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let period = AlertPeriod::open(start);
        assert!(period.is_open());
        assert!(period.duration().is_none());
    }

    #[test]
    fn period_serializes_open_end_as_null() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let json = serde_json::to_value(AlertPeriod::open(start)).unwrap();
        assert_eq!(json["start_time"], "2024-01-01T12:00:00Z");
        assert!(json["end_time"].is_null());
    }
}
