//! Shared, serialized access to the load monitor.
//!
//! One [`LoadMonitorService`] is built at startup and handed to every caller
//! behind an `Arc`. Every operation takes the same lock, and the clock and
//! sampler are read while it is held, so concurrent ingests are applied in
//! timestamp order and never interleave their ledger updates.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use super::config::MonitorConfig;
use super::history::Sample;
use super::monitor::{LoadMonitor, LoadReading};
use super::regime::Regime;
use crate::alert::AlertSummary;
use crate::clock::Clock;
use crate::error::CoreError;
use crate::sampler::LoadSampler;

/// Current reading, history and alerts captured under one lock.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub current_load: LoadReading,
    pub history: Vec<Sample>,
    pub alerts: AlertSummary,
}

pub struct LoadMonitorService {
    monitor: Mutex<LoadMonitor>,
    sampler: Arc<dyn LoadSampler>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for LoadMonitorService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadMonitorService")
            .field("monitor", &self.monitor)
            .finish_non_exhaustive()
    }
}

impl LoadMonitorService {
    pub fn new(
        config: MonitorConfig,
        sampler: Arc<dyn LoadSampler>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, CoreError> {
        let monitor = LoadMonitor::new(config)?;
        Ok(Self {
            monitor: Mutex::new(monitor),
            sampler,
            clock,
        })
    }

    /// Draw one sample, record it and evaluate it.
    ///
    /// This is the only operation that mutates monitor state.
    pub async fn ingest_and_evaluate(&self) -> Result<LoadReading, CoreError> {
        let mut monitor = self.monitor.lock().await;
        self.ingest_locked(&mut monitor)
    }

    /// Ingest once and return the reading together with the resulting
    /// history and alert snapshots.
    pub async fn summary(&self) -> Result<LoadSummary, CoreError> {
        let mut monitor = self.monitor.lock().await;
        let current_load = self.ingest_locked(&mut monitor)?;
        Ok(LoadSummary {
            current_load,
            history: monitor.history(),
            alerts: monitor.alerts(),
        })
    }

    pub async fn current_sample(&self) -> Option<Sample> {
        self.monitor.lock().await.current_sample()
    }

    pub async fn history(&self) -> Vec<Sample> {
        self.monitor.lock().await.history()
    }

    pub async fn alerts(&self) -> AlertSummary {
        self.monitor.lock().await.alerts()
    }

    pub async fn regime(&self) -> Regime {
        self.monitor.lock().await.regime()
    }

    fn ingest_locked(&self, monitor: &mut LoadMonitor) -> Result<LoadReading, CoreError> {
        let value = self.sampler.sample()?;
        let timestamp = self.clock.now();
        let evaluation = monitor.record(Sample::new(value, timestamp))?;
        Ok(evaluation.reading())
    }
}
