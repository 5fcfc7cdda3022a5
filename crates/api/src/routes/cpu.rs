//! Route definitions for CPU load endpoints.

use axum::routing::get;
use axum::Router;

use crate::handlers::cpu;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
///
/// All routes require Basic auth (enforced by handler extractors).
///
/// ```text
/// GET /cpu-load            -> get_cpu_load
/// GET /cpu-load-history    -> get_cpu_history
/// GET /cpu-load-alerts     -> get_cpu_alerts
/// GET /cpu-summary         -> get_cpu_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cpu-load", get(cpu::get_cpu_load))
        .route("/cpu-load-history", get(cpu::get_cpu_history))
        .route("/cpu-load-alerts", get(cpu::get_cpu_alerts))
        .route("/cpu-summary", get(cpu::get_cpu_summary))
}
