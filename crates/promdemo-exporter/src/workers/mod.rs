//! Background loops: producer, consumer and traffic sampler.
//!
//! Each loop is `loop { let pause = step(); sleep(pause).await }`. Steps are
//! synchronous so the thread-local RNG never lives across an `.await`, and so
//! tests can drive them one iteration at a time.

mod consumer;
mod producer;
mod sampler;

pub use consumer::{ConsumeOutcome, Consumer};
pub use producer::{ProduceOutcome, Producer};
pub use sampler::Sampler;

use tokio::task::JoinHandle;

use crate::app_state::AppState;

/// Spawn the three loops. The handles never complete on their own.
pub fn spawn_all(state: &AppState) -> Vec<JoinHandle<()>> {
    tracing::info!(
        capacity = state.queue().capacity(),
        "starting producer, consumer and sampler"
    );
    vec![
        tokio::spawn(Producer::new(state.clone()).run()),
        tokio::spawn(Consumer::new(state.clone()).run()),
        tokio::spawn(Sampler::new(state.clone()).run()),
    ]
}
