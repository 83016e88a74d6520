//! In-process metrics registry and Prometheus text rendering.
//!
//! Metrics are stored as atomics behind `DashMap`s and rendered by the
//! `/metrics` handler. No exporter crate is involved.

pub mod metrics;
