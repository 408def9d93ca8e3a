//! HTTP API of the scanner.
//!
//! # Routes
//! - `GET /` and `GET /health`: liveness probes, never trigger a fetch
//! - `POST /scan`: `{"url": "..."}` in, `{url, status, issues}` out
//!
//! CORS is open so a browser front end served from another origin can call
//! the API directly.

pub mod error;
pub mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::core::scanner::fetcher::Fetcher;

/// Listener settings of the API server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
        }
    }
}

/// State injected into handlers. The fetcher is the only thing scans share.
pub struct AppState<F> {
    pub fetcher: Arc<F>,
}

// Manual impl: deriving would require `F: Clone`.
impl<F> Clone for AppState<F> {
    fn clone(&self) -> Self {
        Self {
            fetcher: Arc::clone(&self.fetcher),
        }
    }
}

/// Builds the router with all middleware layers.
pub fn build_router<F: Fetcher + 'static>(fetcher: Arc<F>) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health))
        .route("/scan", post(handlers::scan::<F>))
        .with_state(AppState { fetcher })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Binds the configured address and serves until Ctrl-C.
pub async fn serve<F: Fetcher + 'static>(config: &ServerConfig, fetcher: F) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    info!(address = %listener.local_addr()?, "Listening for scan requests.");

    axum::serve(listener, build_router(Arc::new(fetcher)))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections."),
        Err(e) => {
            // Without a signal handler the server simply runs until killed.
            error!(error = %e, "Failed to listen for Ctrl-C.");
            std::future::pending::<()>().await;
        }
    }
}
