use integration_tests::harness::fixture_path;
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::time::Duration;
use tailpost_core::conf::{ConfigError, FailurePolicy, load_config};

#[test]
fn basic_fixture_resolves_globs_and_dedupes() {
    // Act
    let validated = load_config(&fixture_path("basic.toml")).expect("basic.toml should load");
    let cfg = validated.config;

    // Assert
    assert_eq!(
        cfg.files,
        vec![
            PathBuf::from("fixtures/logs/a.log"),
            PathBuf::from("fixtures/logs/b.log"),
        ]
    );
    assert_eq!(cfg.tail.count, 2);
    assert_eq!(cfg.tail.poll_interval, Duration::from_secs(2));
    assert_eq!(cfg.sink.timeout, Duration::from_millis(250));
    assert_eq!(cfg.sink.on_failure, FailurePolicy::Fail);
    assert_eq!(
        cfg.sink.destination.as_ref().map(|u| u.as_str()),
        Some("http://127.0.0.1:9/ingest")
    );
}

#[test]
fn invalid_fixture_reports_every_error() {
    let err = load_config(&fixture_path("invalid.toml")).unwrap_err();

    let ConfigError::Validation { report } = err else {
        panic!("expected validation error, got {err:?}");
    };
    assert_eq!(report.errors.len(), 3);

    let plain = report.render_plain();
    assert!(plain.contains("unsupported scheme 'ftp'"), "{plain}");
    assert!(plain.contains("invalid.toml"), "{plain}");
}

#[test]
fn unknown_fields_are_rejected() {
    let err = load_config(&fixture_path("unknown_field.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }), "{err:?}");
}

#[test]
fn missing_config_file_is_a_read_error() {
    let err = load_config(&fixture_path("does-not-exist.toml")).unwrap_err();

    assert!(matches!(err, ConfigError::ReadFile { .. }), "{err:?}");
}
