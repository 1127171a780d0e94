use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::handler;
use crate::application::{CloudData, FetchAndRelay, VehicleBroadcaster};
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;

#[derive(Clone)]
pub struct AppState {
    pub data: Arc<CloudData>,
    pub relay: Arc<FetchAndRelay>,
    pub broadcaster: Arc<VehicleBroadcaster>,
    /// Cancelled to stop the server; also ends open event streams.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(services: &Services, shutdown: CancellationToken) -> Self {
        Self {
            data: services.data.clone(),
            relay: services.relay.clone(),
            broadcaster: services.broadcaster.clone(),
            shutdown,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/brands", get(handler::list_brands))
        .route("/brands/stream", get(handler::stream_brands))
        .route("/cars", get(handler::list_cars))
        .route("/relay", post(handler::relay))
        .route("/broadcast", post(handler::broadcast))
        .route("/health", get(handler::health))
        .with_state(state)
}

/// Serve the API on `listener` until the state's shutdown token is
/// cancelled.
///
/// In-flight requests finish before this returns; open event streams end.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "HTTP API listening");
    }
    let shutdown = state.shutdown.clone();
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}
