pub mod cpu;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /cpu-load                 ingest + current reading
/// /cpu-load-history         retained samples
/// /cpu-load-alerts          alert periods and counts
/// /cpu-summary              ingest + reading, history and alerts
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(cpu::router())
}
