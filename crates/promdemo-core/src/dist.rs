//! Discrete distributions used to fabricate traffic and pacing.
//!
//! A `WeightedTable` maps an integer roll in `[0, total)` onto values through
//! ascending cumulative thresholds. A roll picks the first entry whose
//! threshold is strictly greater than the roll, so an entry's probability is
//! `(threshold - previous_threshold) / total`.

use std::time::Duration;

use rand::Rng;

use crate::error::{PromDemoError, Result};

#[derive(Debug, Clone)]
pub struct WeightedTable<T> {
    entries: Vec<(u32, T)>,
}

impl<T: Copy> WeightedTable<T> {
    /// Build a table from `(cumulative_threshold, value)` pairs.
    ///
    /// Thresholds must be non-zero and strictly increasing. The last threshold
    /// is the size of the roll space.
    pub fn new(entries: Vec<(u32, T)>) -> Result<Self> {
        if entries.is_empty() {
            return Err(PromDemoError::BadConfig("weighted table must not be empty".into()));
        }
        let mut prev = 0u32;
        for (threshold, _) in &entries {
            if *threshold <= prev {
                return Err(PromDemoError::BadConfig(format!(
                    "weighted table thresholds must be strictly increasing (got {threshold} after {prev})"
                )));
            }
            prev = *threshold;
        }
        Ok(Self { entries })
    }

    /// Tables built from compile-time constants; those are checked in tests.
    pub(crate) fn from_sorted(entries: &[(u32, T)]) -> Self {
        Self { entries: entries.to_vec() }
    }

    /// Size of the roll space.
    pub fn total(&self) -> u32 {
        self.entries.last().map(|(t, _)| *t).unwrap_or(0)
    }

    /// Resolve a roll to its value. Rolls at or past `total()` map to the last entry.
    pub fn lookup(&self, roll: u32) -> T {
        let idx = self.entries.partition_point(|(t, _)| *t <= roll);
        self.entries[idx.min(self.entries.len() - 1)].1
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        let total = self.total().max(1);
        self.lookup(rng.random_range(0..total))
    }

    /// Probability mass assigned to each entry, in table order.
    pub fn weights(&self) -> Vec<(T, f64)> {
        let total = f64::from(self.total().max(1));
        let mut prev = 0u32;
        self.entries
            .iter()
            .map(|(t, v)| {
                let w = f64::from(t - prev) / total;
                prev = *t;
                (*v, w)
            })
            .collect()
    }
}

/// Half-open sleep range `[lo_ms, hi_ms)` in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingRange {
    lo_ms: u64,
    hi_ms: u64,
}

impl PacingRange {
    /// Pause after a successful queue operation.
    pub const OK: PacingRange = PacingRange { lo_ms: 1_000, hi_ms: 2_000 };
    /// Pause after the queue was full (producer) or empty (consumer).
    pub const BACKOFF: PacingRange = PacingRange { lo_ms: 5_000, hi_ms: 10_000 };

    pub fn new(lo_ms: u64, hi_ms: u64) -> Result<Self> {
        if lo_ms >= hi_ms {
            return Err(PromDemoError::BadConfig(format!(
                "pacing range must satisfy lo < hi (got [{lo_ms}, {hi_ms}))"
            )));
        }
        Ok(Self { lo_ms, hi_ms })
    }

    pub fn lo_ms(&self) -> u64 {
        self.lo_ms
    }

    pub fn hi_ms(&self) -> u64 {
        self.hi_ms
    }

    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Duration {
        Duration::from_millis(rng.random_range(self.lo_ms..self.hi_ms))
    }

    pub fn contains(&self, d: Duration) -> bool {
        let ms = d.as_millis();
        ms >= u128::from(self.lo_ms) && ms < u128::from(self.hi_ms)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn lookup_respects_half_open_thresholds() {
        let t = WeightedTable::new(vec![(2, 'a'), (5, 'b'), (6, 'c')]).unwrap();
        assert_eq!(t.total(), 6);
        assert_eq!(t.lookup(0), 'a');
        assert_eq!(t.lookup(1), 'a');
        assert_eq!(t.lookup(2), 'b');
        assert_eq!(t.lookup(4), 'b');
        assert_eq!(t.lookup(5), 'c');
        assert_eq!(t.lookup(99), 'c');
    }

    #[test]
    fn rejects_unsorted_or_empty() {
        assert!(WeightedTable::<u8>::new(vec![]).is_err());
        assert!(WeightedTable::new(vec![(5, 1u8), (5, 2)]).is_err());
        assert!(WeightedTable::new(vec![(0, 1u8)]).is_err());
    }

    #[test]
    fn weights_sum_to_one() {
        let t = WeightedTable::new(vec![(80, 1u8), (90, 2), (96, 3), (100, 4)]).unwrap();
        let w = t.weights();
        assert!((w[0].1 - 0.80).abs() < 1e-9);
        assert!((w[3].1 - 0.04).abs() < 1e-9);
        let sum: f64 = w.iter().map(|(_, p)| p).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pacing_draws_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for range in [PacingRange::OK, PacingRange::BACKOFF] {
            for _ in 0..1_000 {
                let d = range.draw(&mut rng);
                assert!(range.contains(d), "{d:?} outside {range:?}");
            }
        }
    }

    #[test]
    fn pacing_rejects_empty_range() {
        assert!(PacingRange::new(10, 10).is_err());
        assert!(PacingRange::new(10, 5).is_err());
        assert_eq!(PacingRange::new(1_000, 2_000).unwrap(), PacingRange::OK);
    }
}
