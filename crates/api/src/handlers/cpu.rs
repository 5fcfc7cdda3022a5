//! Handlers for CPU load endpoints.
//!
//! `GET /cpu-load` and `GET /cpu-summary` each ingest one fresh sample;
//! history and alert endpoints are read-only.

use axum::extract::State;
use axum::Json;
use loadwatch_core::alert::AlertSummary;
use loadwatch_core::load::{LoadReading, LoadSummary, Sample};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /cpu-load
///
/// Sample the current load, run it through alerting and return the reading.
pub async fn get_cpu_load(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<LoadReading>>> {
    let reading = state.monitor.ingest_and_evaluate().await?;
    Ok(Json(DataResponse { data: reading }))
}

/// GET /cpu-load-history
///
/// Samples retained within the history window, oldest first.
pub async fn get_cpu_history(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<Vec<Sample>>>> {
    let history = state.monitor.history().await;
    Ok(Json(DataResponse { data: history }))
}

/// GET /cpu-load-alerts
///
/// High-load and recovery periods plus their counters.
pub async fn get_cpu_alerts(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<AlertSummary>>> {
    let alerts = state.monitor.alerts().await;
    Ok(Json(DataResponse { data: alerts }))
}

/// GET /cpu-summary
///
/// Ingest one sample and return it with the history and alerts.
pub async fn get_cpu_summary(
    State(state): State<AppState>,
    _user: AuthUser,
) -> AppResult<Json<DataResponse<LoadSummary>>> {
    let summary = state.monitor.summary().await?;
    Ok(Json(DataResponse { data: summary }))
}
