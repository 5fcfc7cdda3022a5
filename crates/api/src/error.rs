use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use loadwatch_core::error::CoreError;
use serde_json::json;

/// Message returned for every failure to produce a reading.
const SAMPLE_FAILURE_MESSAGE: &str = "Failed to get CPU load data";

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `loadwatch_core`.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let AppError::Core(core) = &self;
        let (status, code, message) = match core {
            CoreError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),

            // Requests carry no input; a rejected sample came from the host.
            CoreError::Validation(msg) => {
                tracing::error!(error = %msg, "Host sampler produced an invalid reading");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INVALID_SAMPLE",
                    SAMPLE_FAILURE_MESSAGE.to_string(),
                )
            }
            CoreError::OutOfOrderSample { .. } => {
                tracing::warn!(error = %core, "Sample discarded");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "CLOCK_REGRESSION",
                    SAMPLE_FAILURE_MESSAGE.to_string(),
                )
            }
            CoreError::Sampler(msg) => {
                tracing::error!(error = %msg, "Load sampler failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SAMPLER_ERROR",
                    SAMPLE_FAILURE_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
