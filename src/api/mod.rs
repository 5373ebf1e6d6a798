//! HTTP layer exposing the sentiment report as JSON.

pub mod routes;
pub mod types;

use std::net::SocketAddr;

use anyhow::Result;
use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::data::loader::Source;

#[derive(Debug, Clone)]
pub struct AppState {
    pub source: Source,
    pub window: usize,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/sentiment", get(routes::sentiment))
        .route("/healthz", get(routes::healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(state: AppState, host: String, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    info!(%addr, window = state.window, "serving sentiment-quadrant API");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router(state).into_make_service()).await?;
    Ok(())
}
