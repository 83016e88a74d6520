//! promdemo exporter library entry.
//!
//! Wires the bounded work queue, the synthetic traffic sampler and the metrics
//! registry into three background loops plus a scrape endpoint. Consumed by
//! the binary (`main.rs`) and by integration tests.

pub mod app_state;
pub mod config;
pub mod obs;
pub mod ops;
pub mod router;
pub mod workers;
