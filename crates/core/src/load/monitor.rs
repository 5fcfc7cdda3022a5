//! Single-owner composition of history, state machine and ledger.

use serde::Serialize;

use super::config::MonitorConfig;
use super::history::{LoadHistory, Sample};
use super::ledger::AlertLedger;
use super::regime::{AlertStateMachine, Regime, Transition};
use crate::alert::AlertSummary;
use crate::error::CoreError;
use crate::types::{LoadValue, Timestamp};

/// Result of recording one sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub sample: Sample,
    /// Regime after the sample was evaluated.
    pub regime: Regime,
    pub transition: Transition,
}

/// What a caller of the ingest entry point gets back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadReading {
    pub load_average: LoadValue,
    /// The regime is confirmed high load.
    pub is_high_load: bool,
    /// Recovery is pending, or was confirmed by this very sample.
    pub is_recovery: bool,
    pub regime: Regime,
    pub timestamp: Timestamp,
}

impl Evaluation {
    pub fn reading(&self) -> LoadReading {
        let recovered_now = matches!(self.transition, Transition::RecoveryConfirmed { .. });
        LoadReading {
            load_average: self.sample.value,
            is_high_load: self.regime == Regime::High,
            is_recovery: recovered_now || matches!(self.regime, Regime::PendingRecovery { .. }),
            regime: self.regime,
            timestamp: self.sample.timestamp,
        }
    }
}

/// All mutable alerting state. Not synchronized; see
/// [`super::LoadMonitorService`] for the shared wrapper.
#[derive(Debug, Clone)]
pub struct LoadMonitor {
    history: LoadHistory,
    machine: AlertStateMachine,
    ledger: AlertLedger,
}

impl LoadMonitor {
    pub fn new(config: MonitorConfig) -> Result<Self, CoreError> {
        config.validate()?;
        Ok(Self {
            history: LoadHistory::new(config.history_retention),
            machine: AlertStateMachine::new(&config),
            ledger: AlertLedger::new(),
        })
    }

    /// Record a sample and run it through the state machine.
    ///
    /// Rejects negative or non-finite values, and samples older than the
    /// last recorded one. A rejected sample leaves all state untouched.
    pub fn record(&mut self, sample: Sample) -> Result<Evaluation, CoreError> {
        if !sample.value.is_finite() || sample.value < 0.0 {
            tracing::warn!(value = sample.value, "Rejected invalid load sample");
            return Err(CoreError::Validation(format!(
                "load value must be a non-negative number, got {}",
                sample.value
            )));
        }

        if let Some(last) = self.history.latest() {
            if sample.timestamp < last.timestamp {
                tracing::warn!(
                    timestamp = %sample.timestamp,
                    last = %last.timestamp,
                    "Discarded out-of-order load sample"
                );
                return Err(CoreError::OutOfOrderSample {
                    timestamp: sample.timestamp,
                    last: last.timestamp,
                });
            }
        }

        let evicted = self.history.record(sample);
        if evicted > 0 {
            tracing::trace!(evicted, retained = self.history.len(), "Evicted stale samples");
        }

        let transition = self.machine.evaluate(&sample);
        self.ledger.apply(&transition);
        log_transition(&transition, sample.value);

        Ok(Evaluation {
            sample,
            regime: self.machine.regime(),
            transition,
        })
    }

    /// Most recently recorded sample, without ingesting a new one.
    pub fn current_sample(&self) -> Option<Sample> {
        self.history.latest().copied()
    }

    pub fn history(&self) -> Vec<Sample> {
        self.history.snapshot()
    }

    pub fn alerts(&self) -> AlertSummary {
        self.ledger.snapshot()
    }

    pub fn regime(&self) -> Regime {
        self.machine.regime()
    }
}

fn log_transition(transition: &Transition, value: LoadValue) {
    match *transition {
        Transition::None => {}
        Transition::HighPending { since } => {
            tracing::debug!(value, %since, "Load above high threshold, debouncing");
        }
        Transition::HighAbandoned { since } => {
            tracing::debug!(value, %since, "Pending high load abandoned");
        }
        Transition::HighConfirmed { since, at } => {
            tracing::info!(value, %since, %at, "High load confirmed");
        }
        Transition::RecoveryPending { since } => {
            tracing::debug!(value, %since, "Load below recovery threshold, debouncing");
        }
        Transition::RecoveryAbandoned { since } => {
            tracing::debug!(value, %since, "Pending recovery abandoned");
        }
        Transition::RecoveryConfirmed { since, at } => {
            tracing::info!(value, %since, %at, "Recovery from high load confirmed");
        }
    }
}
