//! Shared error type across promdemo crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, PromDemoError>;

/// Unified error type used by core and exporter.
///
/// Queue full/empty are not errors; `WorkQueue` reports them through
/// `Result<(), T>` / `Option<T>`.
#[derive(Debug, Error)]
pub enum PromDemoError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("bind failed: {0}")]
    Bind(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl PromDemoError {
    /// Stable short code, used as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            PromDemoError::BadConfig(_) => "BAD_CONFIG",
            PromDemoError::UnsupportedVersion => "UNSUPPORTED_VERSION",
            PromDemoError::Bind(_) => "BIND",
            PromDemoError::Internal(_) => "INTERNAL",
        }
    }
}
