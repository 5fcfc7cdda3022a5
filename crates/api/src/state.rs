use std::sync::Arc;

use loadwatch_core::load::LoadMonitorService;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (credentials are read by the auth extractor).
    pub config: Arc<ServerConfig>,
    /// The single load monitor instance for this process.
    pub monitor: Arc<LoadMonitorService>,
}
