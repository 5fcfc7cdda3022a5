use chrono::Duration;
use loadwatch_core::load::config::{
    DEFAULT_DEBOUNCE_MINUTES, DEFAULT_HIGH_LOAD_THRESHOLD, DEFAULT_HISTORY_RETENTION_MINUTES,
    DEFAULT_RECOVERY_THRESHOLD,
};
use loadwatch_core::load::MonitorConfig;

use crate::auth::basic::BasicAuthConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the Basic-auth credentials have defaults suitable for
/// local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3001`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Seconds between background samples (default: `10`, `0` disables).
    pub sample_interval_secs: u64,
    /// Credentials accepted on `/api/v1`.
    pub auth: BasicAuthConfig,
    /// Alerting thresholds and windows.
    pub monitor: MonitorConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3001`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `SAMPLE_INTERVAL_SECS` | `10`                       |
    ///
    /// See [`BasicAuthConfig::from_env`] and [`monitor_config_from_env`] for
    /// the remaining variables.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3001".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let sample_interval_secs: u64 = std::env::var("SAMPLE_INTERVAL_SECS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("SAMPLE_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            sample_interval_secs,
            auth: BasicAuthConfig::from_env(),
            monitor: monitor_config_from_env(),
        }
    }
}

/// Load alerting thresholds and windows from environment variables.
///
/// | Env Var                      | Default              |
/// |------------------------------|----------------------|
/// | `HIGH_LOAD_THRESHOLD`        | `1.0`                |
/// | `RECOVERY_THRESHOLD`         | `1.0`                |
/// | `HISTORY_RETENTION_MINUTES`  | `10`                 |
/// | `DEBOUNCE_MINUTES`           | `2`                  |
/// | `HIGH_LOAD_DEBOUNCE_MINUTES` | `DEBOUNCE_MINUTES`   |
/// | `RECOVERY_DEBOUNCE_MINUTES`  | `DEBOUNCE_MINUTES`   |
///
/// # Panics
///
/// Panics if a value does not parse, a window is out of range, or the
/// resulting configuration is inconsistent (e.g. recovery threshold above the
/// high-load threshold).
pub fn monitor_config_from_env() -> MonitorConfig {
    monitor_config_from(|key| std::env::var(key).ok())
}

/// [`monitor_config_from_env`] over an arbitrary variable lookup.
pub fn monitor_config_from(lookup: impl Fn(&str) -> Option<String>) -> MonitorConfig {
    let high_load_threshold: f64 = lookup("HIGH_LOAD_THRESHOLD")
        .map(|v| v.parse().expect("HIGH_LOAD_THRESHOLD must be a valid number"))
        .unwrap_or(DEFAULT_HIGH_LOAD_THRESHOLD);

    let recovery_threshold: f64 = lookup("RECOVERY_THRESHOLD")
        .map(|v| v.parse().expect("RECOVERY_THRESHOLD must be a valid number"))
        .unwrap_or(DEFAULT_RECOVERY_THRESHOLD);

    let retention_minutes = minutes_var(&lookup, "HISTORY_RETENTION_MINUTES")
        .unwrap_or(DEFAULT_HISTORY_RETENTION_MINUTES);
    let debounce_minutes =
        minutes_var(&lookup, "DEBOUNCE_MINUTES").unwrap_or(DEFAULT_DEBOUNCE_MINUTES);
    let high_load_debounce_minutes =
        minutes_var(&lookup, "HIGH_LOAD_DEBOUNCE_MINUTES").unwrap_or(debounce_minutes);
    let recovery_debounce_minutes =
        minutes_var(&lookup, "RECOVERY_DEBOUNCE_MINUTES").unwrap_or(debounce_minutes);

    let config = MonitorConfig {
        high_load_threshold,
        recovery_threshold,
        history_retention: minutes(retention_minutes, "HISTORY_RETENTION_MINUTES"),
        high_load_debounce: minutes(high_load_debounce_minutes, "HIGH_LOAD_DEBOUNCE_MINUTES"),
        recovery_debounce: minutes(recovery_debounce_minutes, "RECOVERY_DEBOUNCE_MINUTES"),
    };

    if let Err(e) = config.validate() {
        panic!("Invalid load monitor configuration: {e}");
    }
    config
}

fn minutes_var(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<i64> {
    lookup(key).map(|v| {
        v.parse()
            .unwrap_or_else(|e| panic!("{key} must be a valid i64: {e}"))
    })
}

fn minutes(value: i64, key: &str) -> Duration {
    Duration::try_minutes(value)
        .unwrap_or_else(|| panic!("{key} is out of range: {value} minutes"))
}
