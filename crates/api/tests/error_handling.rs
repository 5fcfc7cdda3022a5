//! Tests for `AppError` → HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no router is
//! involved.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use loadwatch_api::error::AppError;
use loadwatch_core::error::CoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound("Route /nope not found".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Route /nope not found");
}

#[tokio::test]
async fn unauthorized_error_returns_401() {
    let err = AppError::Core(CoreError::Unauthorized("Invalid credentials".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["code"], "UNAUTHORIZED");
    assert_eq!(json["error"], "Invalid credentials");
}

#[tokio::test]
async fn invalid_sample_is_a_server_error() {
    let err = AppError::Core(CoreError::Validation(
        "load value must be a non-negative number, got NaN".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INVALID_SAMPLE");
    assert_eq!(json["error"], "Failed to get CPU load data");
}

#[tokio::test]
async fn out_of_order_sample_returns_503() {
    let last = Utc.with_ymd_and_hms(2024, 1, 1, 0, 1, 0).unwrap();
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let err = AppError::Core(CoreError::OutOfOrderSample { timestamp, last });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json["code"], "CLOCK_REGRESSION");
    assert_eq!(json["error"], "Failed to get CPU load data");
}

#[tokio::test]
async fn sampler_error_returns_500_and_hides_cause() {
    let err = AppError::Core(CoreError::Sampler("getloadavg returned -1".into()));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "SAMPLER_ERROR");
    assert_eq!(json["error"], "Failed to get CPU load data");
}
