//! Tunables for the load monitor.

use chrono::Duration;

use crate::error::CoreError;

/// Default threshold above which load counts as high.
pub const DEFAULT_HIGH_LOAD_THRESHOLD: f64 = 1.0;

/// Default threshold below which load counts as recovered.
pub const DEFAULT_RECOVERY_THRESHOLD: f64 = 1.0;

/// Default history retention window in minutes.
pub const DEFAULT_HISTORY_RETENTION_MINUTES: i64 = 10;

/// Default debounce window in minutes, applied to both directions.
pub const DEFAULT_DEBOUNCE_MINUTES: i64 = 2;

/// Thresholds and time windows driving history eviction and alerting.
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// A sample strictly above this value counts toward high load.
    pub high_load_threshold: f64,
    /// A sample strictly below this value counts toward recovery.
    pub recovery_threshold: f64,
    /// Samples at least this old (relative to the newest) are evicted.
    pub history_retention: Duration,
    /// How long load must stay high before a high-load alert is confirmed.
    pub high_load_debounce: Duration,
    /// How long load must stay low before a recovery is confirmed.
    pub recovery_debounce: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            high_load_threshold: DEFAULT_HIGH_LOAD_THRESHOLD,
            recovery_threshold: DEFAULT_RECOVERY_THRESHOLD,
            history_retention: Duration::minutes(DEFAULT_HISTORY_RETENTION_MINUTES),
            high_load_debounce: Duration::minutes(DEFAULT_DEBOUNCE_MINUTES),
            recovery_debounce: Duration::minutes(DEFAULT_DEBOUNCE_MINUTES),
        }
    }
}

impl MonitorConfig {
    /// Set both debounce windows at once.
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.high_load_debounce = debounce;
        self.recovery_debounce = debounce;
        self
    }

    /// Set both thresholds at once.
    pub fn with_thresholds(mut self, high_load: f64, recovery: f64) -> Self {
        self.high_load_threshold = high_load;
        self.recovery_threshold = recovery;
        self
    }

    /// Check the invariants the state machine relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_threshold(self.high_load_threshold, "high_load_threshold")?;
        validate_threshold(self.recovery_threshold, "recovery_threshold")?;

        if self.recovery_threshold > self.high_load_threshold {
            return Err(CoreError::Validation(format!(
                "recovery_threshold ({}) must not exceed high_load_threshold ({})",
                self.recovery_threshold, self.high_load_threshold
            )));
        }
        if self.history_retention <= Duration::zero() {
            return Err(CoreError::Validation(
                "history_retention must be positive".to_string(),
            ));
        }
        if self.high_load_debounce < Duration::zero() {
            return Err(CoreError::Validation(
                "high_load_debounce must not be negative".to_string(),
            ));
        }
        if self.recovery_debounce < Duration::zero() {
            return Err(CoreError::Validation(
                "recovery_debounce must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn validate_threshold(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a non-negative number, got {value}"
        )));
    }
    Ok(())
}
