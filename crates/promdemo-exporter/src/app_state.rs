//! Shared application state.
//!
//! One `AppState` is built at startup and cloned into every worker loop and
//! into the router. Cloning is an `Arc` bump.

use std::sync::Arc;

use promdemo_core::dist::PacingRange;
use promdemo_core::error::Result;
use promdemo_core::queue::WorkQueue;
use promdemo_core::sample::SampleModel;

use crate::config::PromDemoConfig;
use crate::obs::metrics::ExporterMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: PromDemoConfig,
    queue: WorkQueue<String>,
    metrics: ExporterMetrics,
    model: SampleModel,
    ok_pause: PacingRange,
    backoff_pause: PacingRange,
}

impl AppState {
    /// Build application state from a config. Fails on invalid settings instead of panicking.
    pub fn new(cfg: PromDemoConfig) -> Result<Self> {
        cfg.validate()?;
        let queue = WorkQueue::new(cfg.queue.capacity)?;
        let ok_pause = cfg.pacing.ok_range()?;
        let backoff_pause = cfg.pacing.backoff_range()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                cfg,
                queue,
                metrics: ExporterMetrics::new(),
                model: SampleModel::new(),
                ok_pause,
                backoff_pause,
            }),
        })
    }

    pub fn cfg(&self) -> &PromDemoConfig {
        &self.inner.cfg
    }

    pub fn queue(&self) -> &WorkQueue<String> {
        &self.inner.queue
    }

    pub fn metrics(&self) -> &ExporterMetrics {
        &self.inner.metrics
    }

    pub fn model(&self) -> &SampleModel {
        &self.inner.model
    }

    /// Pause after a successful enqueue/dequeue.
    pub fn ok_pause(&self) -> PacingRange {
        self.inner.ok_pause
    }

    /// Pause after a full/empty queue.
    pub fn backoff_pause(&self) -> PacingRange {
        self.inner.backoff_pause
    }
}
