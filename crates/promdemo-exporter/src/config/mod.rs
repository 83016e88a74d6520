//! Exporter config loader (strict parsing).
//!
//! The file is optional: when it does not exist the built-in defaults apply.

pub mod schema;

use std::fs;
use std::io::ErrorKind;

use promdemo_core::error::{PromDemoError, Result};

pub use schema::{ExporterSection, PacingSection, PromDemoConfig, QueueSection};

pub const DEFAULT_PATH: &str = "promdemo.yaml";

pub fn load_from_file(path: &str) -> Result<PromDemoConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| PromDemoError::Internal(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

/// Like `load_from_file`, but a missing file yields the defaults.
pub fn load_or_default(path: &str) -> Result<PromDemoConfig> {
    match fs::read_to_string(path) {
        Ok(s) => load_from_str(&s),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(PromDemoConfig::default()),
        Err(e) => Err(PromDemoError::Internal(format!("read config failed: {e}"))),
    }
}

pub fn load_from_str(s: &str) -> Result<PromDemoConfig> {
    let cfg: PromDemoConfig = serde_yaml::from_str(s)
        .map_err(|e| PromDemoError::BadConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}
