//! Axum router wiring and the scrape listener.

use axum::{routing::get, Router};
use promdemo_core::error::{PromDemoError, Result};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(ops::metrics))
        .route("/healthz", get(ops::healthz))
        .with_state(state)
}

/// Bind the configured address and serve until the listener fails.
pub async fn serve(state: AppState) -> Result<()> {
    let listen = state.cfg().exporter.listen_addr()?;
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| PromDemoError::Bind(format!("{listen}: {e}")))?;

    tracing::info!(%listen, "metrics endpoint listening");
    axum::serve(listener, build_router(state))
        .await
        .map_err(|e| PromDemoError::Bind(format!("serve failed: {e}")))
}
