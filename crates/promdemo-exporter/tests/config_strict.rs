#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use promdemo_exporter::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
exporter:
  listen: "0.0.0.0:2112"
queue:
  capacty: 10 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.code(), "BAD_CONFIG");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.exporter.listen, "0.0.0.0:2112");
    assert_eq!(cfg.queue.capacity, 10);
    assert_eq!(cfg.pacing.ok_ms, [1_000, 2_000]);
    assert_eq!(cfg.pacing.backoff_ms, [5_000, 10_000]);
}

#[test]
fn full_config_overrides_defaults() {
    let ok = r#"
version: 1
exporter:
  listen: "127.0.0.1:9000"
queue:
  capacity: 3
pacing:
  ok_ms: [10, 20]
  backoff_ms: [50, 100]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.exporter.listen_addr().unwrap().port(), 9000);
    assert_eq!(cfg.queue.capacity, 3);
    assert_eq!(cfg.pacing.ok_range().unwrap().hi_ms(), 20);
}

#[test]
fn rejects_wrong_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.code(), "UNSUPPORTED_VERSION");
}

#[test]
fn rejects_out_of_range_values() {
    for bad in [
        "version: 1\nqueue:\n  capacity: 0\n",
        "version: 1\nexporter:\n  listen: \"not-an-addr\"\n",
        "version: 1\npacing:\n  ok_ms: [2000, 1000]\n",
        "version: 1\npacing:\n  backoff_ms: [5000, 5000]\n",
    ] {
        let err = config::load_from_str(bad).expect_err(bad);
        assert_eq!(err.code(), "BAD_CONFIG", "{bad}");
    }
}

#[test]
fn missing_file_falls_back_to_defaults() {
    let cfg = config::load_or_default("definitely/not/here/promdemo.yaml").expect("defaults");
    assert_eq!(cfg.queue.capacity, 10);
}

#[test]
fn explicit_path_must_exist() {
    let err = config::load_from_file("definitely/not/here/promdemo.yaml").expect_err("must fail");
    assert_eq!(err.code(), "INTERNAL");
}
