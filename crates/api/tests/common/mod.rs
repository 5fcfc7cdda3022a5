#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use loadwatch_api::auth::basic::{encode_header, BasicAuthConfig};
use loadwatch_api::config::ServerConfig;
use loadwatch_api::router::build_app_router;
use loadwatch_api::state::AppState;
use loadwatch_core::clock::{Clock, ManualClock};
use loadwatch_core::load::{LoadMonitorService, MonitorConfig};
use loadwatch_core::sampler::{LoadSampler, StaticSampler};

pub const TEST_USERNAME: &str = "monitor";
pub const TEST_PASSWORD: &str = "correct horse";

/// Build a test `ServerConfig` with safe defaults.
///
/// Thresholds are `{high: 1.0, recovery: 0.8}` with a 2-minute debounce.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        sample_interval_secs: 0,
        auth: BasicAuthConfig {
            username: TEST_USERNAME.to_string(),
            password: TEST_PASSWORD.to_string(),
        },
        monitor: MonitorConfig::default().with_thresholds(1.0, 0.8),
    }
}

/// A router plus handles on the injected sampler and clock.
pub struct TestApp {
    pub router: Router,
    pub sampler: Arc<StaticSampler>,
    pub clock: Arc<ManualClock>,
}

/// Build the full application router around a controllable sampler and clock.
pub fn build_test_app() -> TestApp {
    build_test_app_with_sampler(Arc::new(StaticSampler::new(0.0)))
}

pub fn build_test_app_with_sampler(sampler: Arc<StaticSampler>) -> TestApp {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let router = build_router(
        Arc::clone(&sampler) as Arc<dyn LoadSampler>,
        Arc::clone(&clock) as Arc<dyn Clock>,
    );
    TestApp {
        router,
        sampler,
        clock,
    }
}

/// Build a router around arbitrary sampler and clock implementations.
pub fn build_router(sampler: Arc<dyn LoadSampler>, clock: Arc<dyn Clock>) -> Router {
    let config = test_config();
    let monitor = LoadMonitorService::new(config.monitor.clone(), sampler, clock)
        .expect("test monitor config is valid");
    let state = AppState {
        config: Arc::new(config.clone()),
        monitor: Arc::new(monitor),
    };
    build_app_router(state, &config)
}

pub fn auth_header() -> String {
    encode_header(TEST_USERNAME, TEST_PASSWORD)
}

/// Send an unauthenticated GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with valid Basic credentials.
pub async fn get_authed(app: Router, uri: &str) -> Response<Body> {
    get_with_auth(app, uri, &auth_header()).await
}

/// Send a GET request with the given `Authorization` header value.
pub async fn get_with_auth(app: Router, uri: &str, authorization: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", authorization)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
