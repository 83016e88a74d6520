//! promdemo exporter
//!
//! - Producer/consumer loops around a bounded queue, tracked by a depth gauge
//! - Synthetic request sampler feeding a labeled counter + histogram
//! - Prometheus scrape endpoint: GET /metrics (default 0.0.0.0:2112)

use tracing_subscriber::{fmt, EnvFilter};

use promdemo_exporter::{app_state::AppState, config, router, workers};

#[tokio::main]
async fn main() {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cfg = match config::load_or_default(config::DEFAULT_PATH) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "config load failed");
            return;
        }
    };

    let state = match AppState::new(cfg) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(code = e.code(), error = %e, "startup failed");
            return;
        }
    };

    let handles = workers::spawn_all(&state);

    // A dead listener is logged, not retried. The loops keep running until the process is killed.
    if let Err(e) = router::serve(state).await {
        tracing::error!(code = e.code(), error = %e, "start error");
    }

    for handle in handles {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "worker task ended");
        }
    }
}
