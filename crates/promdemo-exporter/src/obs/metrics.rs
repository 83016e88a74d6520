//! Counter/gauge/histogram vectors with dynamic labels.
//!
//! Labels are flattened into sorted key vectors so series identity does not
//! depend on the order callers pass them in. Histogram observations are kept
//! as integer microseconds and rendered in seconds.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

type LabelKey = Vec<(String, String)>;

pub const OPS_QUEUED: &str = "promdemo_processed_ops_queued";
pub const REQUESTS_TOTAL: &str = "promdemo_requests_total";
pub const REQUEST_DURATION: &str = "promdemo_request_duration_seconds";

fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> LabelKey {
    let mut key: LabelKey = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

/// `{a="x",b="y"}`, or an empty string when there are no labels.
fn label_block(key: &LabelKey, le: Option<&str>) -> String {
    let mut parts: Vec<String> = key
        .iter()
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
        .collect();
    if let Some(le) = le {
        parts.push(format!("le=\"{}\"", le));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!("{{{}}}", parts.join(","))
    }
}

fn header(out: &mut String, name: &str, help: &str, kind: &str) {
    let _ = writeln!(out, "# HELP {} {}", name, help);
    let _ = writeln!(out, "# TYPE {} {}", name, kind);
}

fn sorted_keys<V>(map: &DashMap<LabelKey, V>) -> Vec<LabelKey> {
    let mut keys: Vec<LabelKey> = map.iter().map(|r| r.key().clone()).collect();
    keys.sort();
    keys
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<LabelKey, AtomicU64>,
}

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value; 0 for a series that was never touched.
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Sum across every label combination.
    pub fn total(&self) -> u64 {
        self.map.iter().map(|r| r.value().load(Ordering::Relaxed)).sum()
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "counter");
        for key in sorted_keys(&self.map) {
            if let Some(c) = self.map.get(&key) {
                let val = c.load(Ordering::Relaxed);
                let _ = writeln!(out, "{}{} {}", name, label_block(&key, None), val);
            }
        }
    }
}

#[derive(Default)]
pub struct GaugeVec {
    map: DashMap<LabelKey, AtomicI64>,
}

impl GaugeVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    pub fn dec(&self, labels: &[(&str, &str)]) {
        self.add(labels, -1);
    }

    pub fn add(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.fetch_add(v, Ordering::Relaxed);
    }

    /// Overwrite the value, creating the series if needed.
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        let gauge = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicI64::new(0));
        gauge.store(v, Ordering::Relaxed);
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.map
            .get(&label_key(labels))
            .map(|g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "gauge");
        for key in sorted_keys(&self.map) {
            if let Some(g) = self.map.get(&key) {
                let val = g.load(Ordering::Relaxed);
                let _ = writeln!(out, "{}{} {}", name, label_block(&key, None), val);
            }
        }
    }
}

// Prometheus client default buckets, in microseconds:
// 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 2.5s, 5s, 10s
const BUCKETS_MICROS: [u64; 11] = [
    5_000, 10_000, 25_000, 50_000, 100_000, 250_000, 500_000, 1_000_000, 2_500_000, 5_000_000,
    10_000_000,
];

fn micros_as_secs(micros: u64) -> String {
    format!("{}", micros as f64 / 1_000_000.0)
}

#[derive(Default)]
struct AtomicHistogram {
    count: AtomicU64,
    sum_micros: AtomicU64,
    buckets: [AtomicU64; BUCKETS_MICROS.len()],
}

/// Snapshot of one histogram series.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistogramSnapshot {
    pub count: u64,
    pub sum_micros: u64,
    /// Cumulative counts, aligned with the `le` bounds.
    pub buckets: Vec<(u64, u64)>,
}

#[derive(Default)]
pub struct HistogramVec {
    map: DashMap<LabelKey, AtomicHistogram>,
}

impl HistogramVec {
    /// Observe a duration and increment every bucket whose bound it fits under.
    pub fn observe(&self, labels: &[(&str, &str)], duration: Duration) {
        let hist = self
            .map
            .entry(label_key(labels))
            .or_insert_with(AtomicHistogram::default);
        let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);

        hist.count.fetch_add(1, Ordering::Relaxed);
        hist.sum_micros.fetch_add(micros, Ordering::Relaxed);

        for (i, &b) in BUCKETS_MICROS.iter().enumerate() {
            if micros <= b {
                hist.buckets[i].fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    pub fn snapshot(&self, labels: &[(&str, &str)]) -> Option<HistogramSnapshot> {
        self.map.get(&label_key(labels)).map(|h| HistogramSnapshot {
            count: h.count.load(Ordering::Relaxed),
            sum_micros: h.sum_micros.load(Ordering::Relaxed),
            buckets: BUCKETS_MICROS
                .iter()
                .zip(h.buckets.iter())
                .map(|(&le, c)| (le, c.load(Ordering::Relaxed)))
                .collect(),
        })
    }

    fn render(&self, name: &str, help: &str, out: &mut String) {
        header(out, name, help, "histogram");
        for key in sorted_keys(&self.map) {
            let Some(hist) = self.map.get(&key) else { continue };

            for (i, &le) in BUCKETS_MICROS.iter().enumerate() {
                let count = hist.buckets[i].load(Ordering::Relaxed);
                let le = micros_as_secs(le);
                let _ = writeln!(out, "{}_bucket{} {}", name, label_block(&key, Some(le.as_str())), count);
            }
            let count = hist.count.load(Ordering::Relaxed);
            let _ = writeln!(out, "{}_bucket{} {}", name, label_block(&key, Some("+Inf")), count);

            let sum = micros_as_secs(hist.sum_micros.load(Ordering::Relaxed));
            let labels = label_block(&key, None);
            let _ = writeln!(out, "{}_sum{} {}", name, labels, sum);
            let _ = writeln!(out, "{}_count{} {}", name, labels, count);
        }
    }
}

/// Every metric family the exporter publishes.
pub struct ExporterMetrics {
    pub ops_queued: GaugeVec,
    pub requests: CounterVec,
    pub request_duration: HistogramVec,
}

impl Default for ExporterMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl ExporterMetrics {
    /// Registry with the queue gauge already exported at 0.
    pub fn new() -> Self {
        let m = Self {
            ops_queued: GaugeVec::default(),
            requests: CounterVec::default(),
            request_duration: HistogramVec::default(),
        };
        m.ops_queued.set(&[], 0);
        m
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.ops_queued.render(
            OPS_QUEUED,
            "Number of operations waiting to be processed.",
            &mut out,
        );
        self.requests.render(
            REQUESTS_TOTAL,
            "Total number of synthetic requests, by status code and method.",
            &mut out,
        );
        self.request_duration.render(
            REQUEST_DURATION,
            "Synthetic request duration in seconds, by status code and method.",
            &mut out,
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_order_does_not_split_series() {
        let c = CounterVec::default();
        c.inc(&[("code", "200"), ("method", "sign")]);
        c.inc(&[("method", "sign"), ("code", "200")]);
        assert_eq!(c.get(&[("code", "200"), ("method", "sign")]), 2);
        assert_eq!(c.total(), 2);
    }

    #[test]
    fn unlabeled_gauge_renders_without_braces() {
        let m = ExporterMetrics::new();
        m.ops_queued.inc(&[]);
        m.ops_queued.inc(&[]);
        m.ops_queued.dec(&[]);
        let out = m.render();
        assert!(out.contains("# TYPE promdemo_processed_ops_queued gauge\n"));
        assert!(out.contains("\npromdemo_processed_ops_queued 1\n"));
    }

    #[test]
    fn default_registry_exports_queue_gauge() {
        let out = ExporterMetrics::default().render();
        assert!(out.contains("\npromdemo_processed_ops_queued 0\n"));
    }

    #[test]
    fn histogram_buckets_are_cumulative_in_seconds() {
        let h = HistogramVec::default();
        let labels = [("code", "200"), ("method", "encrypt")];
        h.observe(&labels, Duration::from_millis(3));
        h.observe(&labels, Duration::from_millis(40));
        h.observe(&labels, Duration::from_millis(4_999));

        let snap = h.snapshot(&labels).expect("series exists");
        assert_eq!(snap.count, 3);
        assert_eq!(snap.sum_micros, 5_042_000);
        assert_eq!(snap.buckets[0], (5_000, 1));
        assert_eq!(snap.buckets[3], (50_000, 2));
        assert_eq!(snap.buckets[8], (2_500_000, 2));
        assert_eq!(snap.buckets[9], (5_000_000, 3));

        let mut out = String::new();
        h.render(REQUEST_DURATION, "help", &mut out);
        assert!(out.contains(
            "promdemo_request_duration_seconds_bucket{code=\"200\",method=\"encrypt\",le=\"0.005\"} 1"
        ));
        assert!(out.contains(
            "promdemo_request_duration_seconds_bucket{code=\"200\",method=\"encrypt\",le=\"2.5\"} 2"
        ));
        assert!(out.contains(
            "promdemo_request_duration_seconds_bucket{code=\"200\",method=\"encrypt\",le=\"+Inf\"} 3"
        ));
        assert!(out.contains(
            "promdemo_request_duration_seconds_sum{code=\"200\",method=\"encrypt\"} 5.042"
        ));
    }

    #[test]
    fn label_values_are_escaped() {
        let c = CounterVec::default();
        c.inc(&[("method", "a\"b\\c\nd")]);
        let mut out = String::new();
        c.render("x_total", "help", &mut out);
        assert!(out.contains(r#"x_total{method="a\"b\\c\nd"} 1"#));
    }
}
