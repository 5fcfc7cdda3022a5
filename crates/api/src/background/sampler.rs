//! Periodic load sampling.
//!
//! Ingests one sample per tick so history and alerting advance even when no
//! client is polling `/cpu-load`. Ticks go through the same serialized entry
//! point as HTTP requests.

use std::sync::Arc;
use std::time::Duration;

use loadwatch_core::load::LoadMonitorService;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Run the sampling loop until `cancel` is triggered.
pub async fn run(monitor: Arc<LoadMonitorService>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Load sampling job started");

    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Load sampling job stopping");
                break;
            }
            _ = ticker.tick() => {
                match monitor.ingest_and_evaluate().await {
                    Ok(reading) => {
                        tracing::debug!(
                            load = reading.load_average,
                            high = reading.is_high_load,
                            recovery = reading.is_recovery,
                            "Load sampled"
                        );
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Load sampling failed");
                    }
                }
            }
        }
    }
}
