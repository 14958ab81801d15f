//! REST API for a finished charging session.
//!
//! Provides two GET endpoints:
//! - `/summary`: scenario config, session summary, and sample count
//! - `/samples`: recorded samples with optional index-range filtering

mod handlers;
mod types;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;

use crate::config::ScenarioConfig;
use crate::sim::summary::SessionSummary;
use crate::sim::types::ResultSet;

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the simulation run completes and wrapped in
/// `Arc`; all data is read-only, so no locks are needed.
pub struct AppState {
    /// Scenario used for this run.
    pub config: ScenarioConfig,
    /// Aggregate session summary.
    pub summary: SessionSummary,
    /// Recorded samples.
    pub results: ResultSet,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/summary", get(handlers::get_summary))
        .route("/samples", get(handlers::get_samples))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> std::io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on http://{addr}");
    axum::serve(listener, app).await
}
