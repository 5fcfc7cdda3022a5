use crate::types::Timestamp;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Out-of-order sample: {timestamp} is earlier than last recorded {last}")]
    OutOfOrderSample {
        timestamp: Timestamp,
        last: Timestamp,
    },

    #[error("Load sampler failed: {0}")]
    Sampler(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}
