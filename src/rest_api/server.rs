//! Axum HTTP server for the REST API

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::report::ReportGenerator;
use crate::{Error, Result};

use super::handlers;

/// Shared state for all handlers
pub struct AppState {
    pub generator: ReportGenerator,
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/emission/{activity}", get(handlers::get_emissions));

    #[cfg(feature = "metrics")]
    let router = router.route("/metrics", get(handlers::metrics));

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Run the REST API server until ctrl-c
pub async fn run_server(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::ConfigError(format!("Failed to bind to {}: {}", addr, e)))?;
    info!("REST API server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| Error::ConfigError(format!("Server error: {}", e)))?;

    info!("REST API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
