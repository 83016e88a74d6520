use std::time::Duration;

use crate::app_state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProduceOutcome {
    Enqueued { index: u64 },
    Full { item: String },
}

/// Pushes `item_0`, `item_1`, ... into the shared queue.
pub struct Producer {
    state: AppState,
    next: u64,
}

impl Producer {
    pub fn new(state: AppState) -> Self {
        Self { state, next: 0 }
    }

    /// One non-blocking enqueue attempt. The index advances either way.
    pub fn attempt(&mut self) -> ProduceOutcome {
        let index = self.next;
        self.next += 1;

        match self.state.queue().try_enqueue(format!("item_{index}")) {
            Ok(()) => {
                self.state.metrics().ops_queued.inc(&[]);
                tracing::info!(item = %format_args!("item_{index}"), "produce");
                ProduceOutcome::Enqueued { index }
            }
            Err(item) => {
                tracing::debug!(item = %item, "queue full, backing off");
                ProduceOutcome::Full { item }
            }
        }
    }

    /// Attempt once and pick the pause before the next attempt.
    pub fn step(&mut self) -> Duration {
        let outcome = self.attempt();
        let mut rng = rand::rng();
        match outcome {
            ProduceOutcome::Enqueued { .. } => self.state.ok_pause().draw(&mut rng),
            ProduceOutcome::Full { .. } => self.state.backoff_pause().draw(&mut rng),
        }
    }

    pub async fn run(mut self) {
        loop {
            let pause = self.step();
            tokio::time::sleep(pause).await;
        }
    }
}
