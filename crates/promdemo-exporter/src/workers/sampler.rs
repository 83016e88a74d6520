use promdemo_core::sample::Sample;

use crate::app_state::AppState;

fn labels(sample: &Sample) -> [(&'static str, &'static str); 2] {
    [("code", sample.code.as_str()), ("method", sample.method.as_str())]
}

/// Fabricates request traffic into the labeled counter and histogram.
pub struct Sampler {
    state: AppState,
}

impl Sampler {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Draw a sample and count it. The caller sleeps for `sample.duration`
    /// before calling `finish`.
    pub fn begin(&self) -> Sample {
        let sample = self.state.model().draw(&mut rand::rng());
        self.state.metrics().requests.inc(&labels(&sample));
        tracing::trace!(
            code = sample.code.as_u16(),
            method = sample.method.as_str(),
            duration_ms = sample.duration.as_millis() as u64,
            "sample"
        );
        sample
    }

    /// Record the sample's duration into the histogram.
    pub fn finish(&self, sample: &Sample) {
        self.state
            .metrics()
            .request_duration
            .observe(&labels(sample), sample.duration);
    }

    pub async fn run(self) {
        loop {
            let sample = self.begin();
            tokio::time::sleep(sample.duration).await;
            self.finish(&sample);
        }
    }
}
