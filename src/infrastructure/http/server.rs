//! HTTP API server.

use anyhow::{Context, Result};
use axum::routing::post;
use axum::Router;
use tracing::info;

use super::handlers::{ask, feedback, ApiState};

/// Build the API router over shared state.
pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/feedback", post(feedback))
        .with_state(state)
}

/// Bind and serve the API until the process is stopped.
pub async fn serve(host: &str, port: u16, state: ApiState) -> Result<()> {
    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context(format!("Failed to bind {addr}"))?;

    info!("HTTP API listening on {addr}");

    axum::serve(listener, router(state))
        .await
        .context("HTTP server terminated")?;

    Ok(())
}
