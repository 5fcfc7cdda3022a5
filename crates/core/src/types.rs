/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Normalized processor load: 1-minute load average divided by logical core count.
pub type LoadValue = f64;
