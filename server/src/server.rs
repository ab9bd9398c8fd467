//! Server initialization and routing
//!
//! This module handles the Axum server setup including:
//! - Router configuration with the ranking and health endpoints
//! - Middleware stack (tracing, timeout, body limit)
//! - Graceful shutdown handling

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::routing::{get, post};
use smartfit_ranking::Ranker;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::{ServerConfig, ServerSettings};
use crate::error::{ServerError, ServerResult};
use crate::routes::{health, not_found, rank};
use crate::state::AppState;

/// Build the Axum router with all routes and middleware.
pub fn build_router(state: AppState, settings: &ServerSettings) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/rank-candidates", post(rank::rank_candidates))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(settings.max_body_bytes()))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            settings.timeout(),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the SmartFit HTTP server
///
/// Builds the ranker from `config`, binds the configured address and serves
/// until SIGTERM or Ctrl+C. In-flight requests finish before returning.
pub async fn start_server(config: ServerConfig) -> ServerResult<()> {
    let ranker =
        Ranker::from_config(&config.ranking).map_err(|e| ServerError::Config(e.to_string()))?;
    info!(
        "Embedding provider: {} ({})",
        ranker.provider().name(),
        ranker.provider().default_model()
    );

    let app = build_router(AppState::new(ranker), &config.server);
    let addr = config.server.socket_addr()?;

    info!("Starting SmartFit server on {addr}");
    info!(
        "Timeout: {}s, Max body: {}MB",
        config.server.timeout_secs, config.server.max_body_mb
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed never
/// resolves, leaving the other one in charge.
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
        _ = terminate => info!("Received SIGTERM, shutting down..."),
    }
}
