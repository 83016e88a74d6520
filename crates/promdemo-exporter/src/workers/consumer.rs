use std::time::Duration;

use crate::app_state::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsumeOutcome {
    Dequeued { item: String },
    Empty,
}

/// Drains the shared queue one item per attempt.
pub struct Consumer {
    state: AppState,
}

impl Consumer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn attempt(&self) -> ConsumeOutcome {
        match self.state.queue().try_dequeue() {
            Some(item) => {
                self.state.metrics().ops_queued.dec(&[]);
                tracing::info!(item = %item, "consume");
                ConsumeOutcome::Dequeued { item }
            }
            None => {
                tracing::debug!("queue empty, backing off");
                ConsumeOutcome::Empty
            }
        }
    }

    pub fn step(&self) -> Duration {
        let outcome = self.attempt();
        let mut rng = rand::rng();
        match outcome {
            ConsumeOutcome::Dequeued { .. } => self.state.ok_pause().draw(&mut rng),
            ConsumeOutcome::Empty => self.state.backoff_pause().draw(&mut rng),
        }
    }

    pub async fn run(self) {
        loop {
            let pause = self.step();
            tokio::time::sleep(pause).await;
        }
    }
}
