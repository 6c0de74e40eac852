//! REST API over a finished optimization.
//!
//! Provides four GET endpoints:
//! - `/result` - optimal size, its investment and the comparison sizes
//! - `/candidates` - every swept candidate
//! - `/simulate?capacity=N` - re-simulation of an arbitrary size
//! - `/investment?capacity=N` - cost breakdown of an arbitrary size

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tracing::info;

use crate::sim::{Optimizer, SimulationResult, SiteInput};

pub use types::{ErrorResponse, InvestmentQuery, ResultResponse, SimulateQuery};

/// Immutable application state shared across all request handlers.
///
/// Built once after the optimization completes and wrapped in `Arc`; all
/// data is read-only.
pub struct AppState {
    /// Site the optimization ran for.
    pub site: SiteInput,
    /// Optimizer used for the sweep, reused for ad-hoc simulations.
    pub optimizer: Optimizer,
    /// Selected size.
    pub optimal: SimulationResult,
    /// Every candidate, in candidate order.
    pub candidates: Vec<SimulationResult>,
    /// Fixed comparison sizes.
    pub comparison: Vec<SimulationResult>,
}

/// Builds the axum router with all API routes.
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured `Router` ready to serve.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/result", get(handlers::get_result))
        .route("/candidates", get(handlers::get_candidates))
        .route("/simulate", get(handlers::get_simulate))
        .route("/investment", get(handlers::get_investment))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
