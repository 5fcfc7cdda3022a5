//! Debounced high-load / recovery state machine.
//!
//! Pure logic over `(value, timestamp)` pairs. The machine never reads a
//! clock and never touches the ledger; it reports what happened as a
//! [`Transition`] and the caller applies it.
//!
//! ```text
//!            value > high                 value > high, debounce elapsed
//!   Normal ---------------> PendingHigh --------------------------------> High
//!     ^                         |                                          |
//!     |      value <= high      |                         value < recovery |
//!     +-------------------------+                                          v
//!     |                                                             PendingRecovery
//!     |        value < recovery, debounce elapsed                    |        |
//!     +--------------------------------------------------------------+        |
//!                                           value >= recovery (back to High)  |
//! ```

use chrono::Duration;
use serde::Serialize;

use super::config::MonitorConfig;
use super::history::Sample;
use crate::types::Timestamp;

/// Current alerting regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Regime {
    Normal,
    /// Load went above the high threshold at `since`; not yet confirmed.
    PendingHigh { since: Timestamp },
    High,
    /// Load went below the recovery threshold at `since`; not yet confirmed.
    PendingRecovery { since: Timestamp },
}

/// Outcome of evaluating one sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// No regime change.
    None,
    HighPending { since: Timestamp },
    HighAbandoned { since: Timestamp },
    /// High load sustained for the debounce window, starting at `since`.
    HighConfirmed { since: Timestamp, at: Timestamp },
    RecoveryPending { since: Timestamp },
    RecoveryAbandoned { since: Timestamp },
    /// Recovery sustained for the debounce window, starting at `since`.
    RecoveryConfirmed { since: Timestamp, at: Timestamp },
}

/// Hysteresis state machine with per-direction debounce windows.
#[derive(Debug, Clone)]
pub struct AlertStateMachine {
    regime: Regime,
    high_load_threshold: f64,
    recovery_threshold: f64,
    high_load_debounce: Duration,
    recovery_debounce: Duration,
}

impl AlertStateMachine {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            regime: Regime::Normal,
            high_load_threshold: config.high_load_threshold,
            recovery_threshold: config.recovery_threshold,
            high_load_debounce: config.high_load_debounce,
            recovery_debounce: config.recovery_debounce,
        }
    }

    pub fn regime(&self) -> Regime {
        self.regime
    }

    /// Feed one sample through the machine.
    ///
    /// Comparisons are strict: a value equal to a threshold neither exceeds
    /// the high threshold nor falls below the recovery threshold.
    pub fn evaluate(&mut self, sample: &Sample) -> Transition {
        let Sample { value, timestamp } = *sample;
        let above_high = value > self.high_load_threshold;
        let below_recovery = value < self.recovery_threshold;

        match self.regime {
            Regime::Normal => {
                if !above_high {
                    return Transition::None;
                }
                self.regime = Regime::PendingHigh { since: timestamp };
                self.confirm_high(timestamp, timestamp)
                    .unwrap_or(Transition::HighPending { since: timestamp })
            }
            Regime::PendingHigh { since } => {
                if above_high {
                    self.confirm_high(since, timestamp)
                        .unwrap_or(Transition::None)
                } else {
                    self.regime = Regime::Normal;
                    Transition::HighAbandoned { since }
                }
            }
            Regime::High => {
                if !below_recovery {
                    return Transition::None;
                }
                self.regime = Regime::PendingRecovery { since: timestamp };
                self.confirm_recovery(timestamp, timestamp)
                    .unwrap_or(Transition::RecoveryPending { since: timestamp })
            }
            Regime::PendingRecovery { since } => {
                if below_recovery {
                    self.confirm_recovery(since, timestamp)
                        .unwrap_or(Transition::None)
                } else {
                    self.regime = Regime::High;
                    Transition::RecoveryAbandoned { since }
                }
            }
        }
    }

    fn confirm_high(&mut self, since: Timestamp, at: Timestamp) -> Option<Transition> {
        if at - since < self.high_load_debounce {
            return None;
        }
        self.regime = Regime::High;
        Some(Transition::HighConfirmed { since, at })
    }

    fn confirm_recovery(&mut self, since: Timestamp, at: Timestamp) -> Option<Transition> {
        if at - since < self.recovery_debounce {
            return None;
        }
        self.regime = Regime::Normal;
        Some(Transition::RecoveryConfirmed { since, at })
    }
}
