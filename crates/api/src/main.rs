use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use loadwatch_api::background;
use loadwatch_api::config::ServerConfig;
use loadwatch_api::router::build_app_router;
use loadwatch_api::state::AppState;
use loadwatch_core::clock::SystemClock;
use loadwatch_core::load::LoadMonitorService;
use loadwatch_core::sampler::HostLoadSampler;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loadwatch_api=debug,loadwatch_core=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        high_load_threshold = config.monitor.high_load_threshold,
        recovery_threshold = config.monitor.recovery_threshold,
        "Loaded server configuration"
    );

    // --- Load monitor ---
    let sampler = HostLoadSampler::new();
    tracing::info!(cores = sampler.cores(), "Load sampler ready");

    let monitor = Arc::new(
        LoadMonitorService::new(
            config.monitor.clone(),
            Arc::new(sampler),
            Arc::new(SystemClock::new()),
        )
        .expect("Invalid load monitor configuration"),
    );

    // --- Background sampling ---
    let sampler_cancel = CancellationToken::new();
    let sampler_handle = (config.sample_interval_secs > 0).then(|| {
        tokio::spawn(background::sampler::run(
            Arc::clone(&monitor),
            Duration::from_secs(config.sample_interval_secs),
            sampler_cancel.clone(),
        ))
    });
    if sampler_handle.is_none() {
        tracing::info!("Background sampling disabled, sampling on request only");
    }

    // --- App state ---
    let state = AppState {
        config: Arc::new(config.clone()),
        monitor,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    sampler_cancel.cancel();
    if let Some(handle) = sampler_handle {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        tracing::info!("Load sampling job stopped");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
