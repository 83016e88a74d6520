//! promdemo core: runtime-agnostic primitives for the synthetic load generator.
//!
//! This crate holds the bounded work queue, the discrete distributions used to
//! fabricate traffic, and the shared error surface. It carries no async runtime
//! or HTTP dependencies so the sampling logic can be tested in isolation.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Fallible paths surface as `PromDemoError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod dist;
pub mod error;
pub mod queue;
pub mod sample;

/// Shared result type.
pub use error::{PromDemoError, Result};
