use std::net::SocketAddr;

use serde::Deserialize;
use promdemo_core::dist::PacingRange;
use promdemo_core::error::{PromDemoError, Result};
use promdemo_core::queue::DEFAULT_CAPACITY;

const MAX_QUEUE_CAPACITY: usize = 10_000;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromDemoConfig {
    pub version: u32,

    #[serde(default)]
    pub exporter: ExporterSection,

    #[serde(default)]
    pub queue: QueueSection,

    #[serde(default)]
    pub pacing: PacingSection,
}

impl Default for PromDemoConfig {
    fn default() -> Self {
        Self {
            version: 1,
            exporter: ExporterSection::default(),
            queue: QueueSection::default(),
            pacing: PacingSection::default(),
        }
    }
}

impl PromDemoConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(PromDemoError::UnsupportedVersion);
        }
        self.exporter.listen_addr()?;
        self.queue.validate()?;
        self.pacing.ok_range()?;
        self.pacing.backoff_range()?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExporterSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ExporterSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ExporterSection {
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            PromDemoError::BadConfig(format!("exporter.listen is not a socket address: {e}"))
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QueueSection {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for QueueSection {
    fn default() -> Self {
        Self { capacity: default_capacity() }
    }
}

impl QueueSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_QUEUE_CAPACITY).contains(&self.capacity) {
            return Err(PromDemoError::BadConfig(format!(
                "queue.capacity must be between 1 and {MAX_QUEUE_CAPACITY}"
            )));
        }
        Ok(())
    }
}

/// Sleep ranges in milliseconds, written as `[lo, hi]` and drawn from `[lo, hi)`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PacingSection {
    #[serde(default = "default_ok_ms")]
    pub ok_ms: [u64; 2],

    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: [u64; 2],
}

impl Default for PacingSection {
    fn default() -> Self {
        Self {
            ok_ms: default_ok_ms(),
            backoff_ms: default_backoff_ms(),
        }
    }
}

impl PacingSection {
    pub fn ok_range(&self) -> Result<PacingRange> {
        PacingRange::new(self.ok_ms[0], self.ok_ms[1])
            .map_err(|e| PromDemoError::BadConfig(format!("pacing.ok_ms: {e}")))
    }

    pub fn backoff_range(&self) -> Result<PacingRange> {
        PacingRange::new(self.backoff_ms[0], self.backoff_ms[1])
            .map_err(|e| PromDemoError::BadConfig(format!("pacing.backoff_ms: {e}")))
    }
}

fn default_listen() -> String {
    "0.0.0.0:2112".into()
}
fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
fn default_ok_ms() -> [u64; 2] {
    [PacingRange::OK.lo_ms(), PacingRange::OK.hi_ms()]
}
fn default_backoff_ms() -> [u64; 2] {
    [PacingRange::BACKOFF.lo_ms(), PacingRange::BACKOFF.hi_ms()]
}
