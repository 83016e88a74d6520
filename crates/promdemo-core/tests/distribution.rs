//! Statistical checks: sampled frequencies converge to the configured weights.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use promdemo_core::sample::{Method, SampleModel, StatusCode, MAX_DURATION_MS};
use rand::rngs::StdRng;
use rand::SeedableRng;

const DRAWS: usize = 200_000;
const TOLERANCE: f64 = 0.01;

fn frequencies<T: Eq + Hash + Copy>(values: impl Iterator<Item = T>) -> HashMap<T, f64> {
    let mut counts: HashMap<T, usize> = HashMap::new();
    for v in values {
        *counts.entry(v).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(k, c)| (k, c as f64 / DRAWS as f64))
        .collect()
}

#[test]
fn status_codes_converge() {
    let model = SampleModel::new();
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let freq = frequencies((0..DRAWS).map(|_| model.codes().pick(&mut rng)));

    for (code, expected) in [
        (StatusCode::Ok, 0.80),
        (StatusCode::MovedPermanently, 0.10),
        (StatusCode::NotFound, 0.06),
        (StatusCode::InternalServerError, 0.04),
    ] {
        let got = freq.get(&code).copied().unwrap_or(0.0);
        assert!(
            (got - expected).abs() < TOLERANCE,
            "{code:?}: got {got:.4}, expected {expected}"
        );
    }
}

#[test]
fn methods_converge() {
    let model = SampleModel::new();
    let mut rng = StdRng::seed_from_u64(42);
    let freq = frequencies((0..DRAWS).map(|_| model.methods().pick(&mut rng)));

    for (method, expected) in [
        (Method::Sign, 0.45),
        (Method::SignVerify, 0.45),
        (Method::Encrypt, 0.05),
        (Method::Decrypt, 0.05),
    ] {
        let got = freq.get(&method).copied().unwrap_or(0.0);
        assert!(
            (got - expected).abs() < TOLERANCE,
            "{method:?}: got {got:.4}, expected {expected}"
        );
    }
}

#[test]
fn durations_bounded_and_mostly_short() {
    let model = SampleModel::new();
    let mut rng = StdRng::seed_from_u64(9);
    let durations: Vec<Duration> = (0..DRAWS).map(|_| model.draw_duration(&mut rng)).collect();

    assert!(durations
        .iter()
        .all(|d| d.as_millis() < u128::from(MAX_DURATION_MS)));

    // First tier draws from [0, 5) with 90% mass; later tiers also land there sometimes.
    let short = durations.iter().filter(|d| d.as_millis() < 5).count() as f64 / DRAWS as f64;
    assert!(short >= 0.90 - TOLERANCE, "short fraction {short:.4}");

    // Anything at or above 1000ms can only come from the last 0.5% tier.
    let long = durations.iter().filter(|d| d.as_millis() >= 1_000).count() as f64 / DRAWS as f64;
    assert!(long <= 0.005, "long fraction {long:.4}");
}

#[test]
fn full_sample_uses_all_three_draws() {
    let model = SampleModel::new();
    let mut rng = StdRng::seed_from_u64(1);
    let samples: Vec<_> = (0..10_000).map(|_| model.draw(&mut rng)).collect();

    assert!(samples.iter().any(|s| s.code == StatusCode::InternalServerError));
    assert!(samples.iter().any(|s| s.method == Method::Decrypt));
    assert!(samples.iter().all(|s| s.seconds() < 5.0));
}
