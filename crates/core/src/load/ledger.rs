//! Record of confirmed alert periods.
//!
//! Two append-only lists plus monotonic counters. The only mutation of an
//! existing entry is closing the newest one. Unlike history, nothing is ever
//! evicted.

use super::regime::Transition;
use crate::alert::{AlertKind, AlertPeriod, AlertSummary};
use crate::types::Timestamp;

#[derive(Debug, Clone, Default)]
pub struct AlertLedger {
    high_load_alerts: Vec<AlertPeriod>,
    recovery_alerts: Vec<AlertPeriod>,
    high_load_count: u64,
    recovery_count: u64,
}

impl AlertLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a confirmed transition. Non-confirming transitions are no-ops.
    pub fn apply(&mut self, transition: &Transition) {
        match *transition {
            Transition::HighConfirmed { since, .. } => {
                self.close_open(AlertKind::Recovery, since);
                self.open(AlertKind::HighLoad, since);
                self.high_load_count += 1;
            }
            Transition::RecoveryConfirmed { since, at } => {
                self.close_open(AlertKind::HighLoad, since);
                self.record_closed(AlertKind::Recovery, since, at);
                self.recovery_count += 1;
            }
            _ => {}
        }
    }

    /// Open a new period, closing any period of the same kind still open.
    pub fn open(&mut self, kind: AlertKind, start: Timestamp) {
        self.close_open(kind, start);
        self.periods_mut(kind).push(AlertPeriod::open(start));
    }

    /// Append a period that has already ended.
    pub fn record_closed(&mut self, kind: AlertKind, start: Timestamp, end: Timestamp) {
        self.close_open(kind, start);
        self.periods_mut(kind).push(AlertPeriod::closed(start, end));
    }

    /// Close the newest period of `kind` if it is open.
    ///
    /// The end time is clamped so it never precedes the start. Returns
    /// whether a period was closed.
    pub fn close_open(&mut self, kind: AlertKind, end: Timestamp) -> bool {
        match self.periods_mut(kind).last_mut() {
            Some(period) if period.is_open() => {
                period.end_time = Some(end.max(period.start_time));
                true
            }
            _ => false,
        }
    }

    /// The currently open period of `kind`, if any.
    pub fn open_period(&self, kind: AlertKind) -> Option<&AlertPeriod> {
        self.periods(kind).last().filter(|p| p.is_open())
    }

    pub fn snapshot(&self) -> AlertSummary {
        AlertSummary {
            high_load_alerts: self.high_load_alerts.clone(),
            recovery_alerts: self.recovery_alerts.clone(),
            high_load_count: self.high_load_count,
            recovery_count: self.recovery_count,
        }
    }

    fn periods(&self, kind: AlertKind) -> &Vec<AlertPeriod> {
        match kind {
            AlertKind::HighLoad => &self.high_load_alerts,
            AlertKind::Recovery => &self.recovery_alerts,
        }
    }

    fn periods_mut(&mut self, kind: AlertKind) -> &mut Vec<AlertPeriod> {
        match kind {
            AlertKind::HighLoad => &mut self.high_load_alerts,
            AlertKind::Recovery => &mut self.recovery_alerts,
        }
    }
}
