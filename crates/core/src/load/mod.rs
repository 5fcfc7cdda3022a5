//! Load monitoring domain logic.
//!
//! - [`history`] -- time-bounded sample history.
//! - [`regime`] -- debounced high-load / recovery state machine.
//! - [`ledger`] -- confirmed alert periods and counters.
//! - [`monitor`] -- single-owner composition of the three.
//! - [`service`] -- lock-serialized facade used by the HTTP layer.
//!
//! Everything except [`service`] is synchronous and clock-free.

pub mod config;
pub mod history;
pub mod ledger;
pub mod monitor;
pub mod regime;
pub mod service;

pub use config::MonitorConfig;
pub use history::{LoadHistory, Sample};
pub use ledger::AlertLedger;
pub use monitor::{Evaluation, LoadMonitor, LoadReading};
pub use regime::{AlertStateMachine, Regime, Transition};
pub use service::{LoadMonitorService, LoadSummary};
