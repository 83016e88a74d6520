//! Synthetic request samples: status code, method and duration.

use std::time::Duration;

use rand::Rng;

use crate::dist::WeightedTable;

/// Synthetic HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    /// 200
    Ok,
    /// 301
    MovedPermanently,
    /// 404
    NotFound,
    /// 500
    InternalServerError,
}

impl StatusCode {
    /// Numeric status code.
    pub fn as_u16(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::MovedPermanently => 301,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Label value used in exported metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            StatusCode::Ok => "200",
            StatusCode::MovedPermanently => "301",
            StatusCode::NotFound => "404",
            StatusCode::InternalServerError => "500",
        }
    }
}

/// Synthetic operation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Sign,
    SignVerify,
    Encrypt,
    Decrypt,
}

impl Method {
    /// Label value used in exported metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Sign => "sign",
            Method::SignVerify => "signVerify",
            Method::Encrypt => "encrypt",
            Method::Decrypt => "decrypt",
        }
    }
}

// Cumulative thresholds out of 100.
const STATUS_TABLE: [(u32, StatusCode); 4] = [
    (80, StatusCode::Ok),
    (90, StatusCode::MovedPermanently),
    (96, StatusCode::NotFound),
    (100, StatusCode::InternalServerError),
];

const METHOD_TABLE: [(u32, Method); 4] = [
    (45, Method::Sign),
    (90, Method::SignVerify),
    (95, Method::Encrypt),
    (100, Method::Decrypt),
];

/// Cumulative thresholds out of 1000, each mapped to the exclusive upper bound
/// (ms) of a uniform draw starting at 0.
const DURATION_TIERS: [(u32, u64); 7] = [
    (900, 5),
    (950, 10),
    (970, 50),
    (980, 100),
    (990, 500),
    (995, 1_000),
    (1_000, 5_000),
];

/// Longest duration the model can produce, exclusive.
pub const MAX_DURATION_MS: u64 = 5_000;

/// One fabricated request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub code: StatusCode,
    pub method: Method,
    pub duration: Duration,
}

impl Sample {
    /// Duration as fractional seconds, the unit the histogram records.
    pub fn seconds(&self) -> f64 {
        self.duration.as_secs_f64()
    }
}

/// Fixed status, method and duration distributions.
#[derive(Debug, Clone)]
pub struct SampleModel {
    codes: WeightedTable<StatusCode>,
    methods: WeightedTable<Method>,
    tiers: WeightedTable<u64>,
}

impl Default for SampleModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleModel {
    /// Model built from the built-in tables.
    pub fn new() -> Self {
        Self {
            codes: WeightedTable::from_sorted(&STATUS_TABLE),
            methods: WeightedTable::from_sorted(&METHOD_TABLE),
            tiers: WeightedTable::from_sorted(&DURATION_TIERS),
        }
    }

    /// Status code table (out of 100).
    pub fn codes(&self) -> &WeightedTable<StatusCode> {
        &self.codes
    }

    /// Method table (out of 100).
    pub fn methods(&self) -> &WeightedTable<Method> {
        &self.methods
    }

    /// Upper bound (ms, exclusive) of the tier selected by `roll` in `[0, 1000)`.
    pub fn tier_bound_ms(&self, roll: u32) -> u64 {
        self.tiers.lookup(roll)
    }

    /// Pick a tier, then a uniform duration below its bound.
    pub fn draw_duration<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        let bound = self.tiers.pick(rng);
        Duration::from_millis(rng.random_range(0..bound))
    }

    /// Draw code, method and duration independently.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Sample {
        let code = self.codes.pick(rng);
        let method = self.methods.pick(rng);
        let duration = self.draw_duration(rng);
        Sample { code, method, duration }
    }
}
