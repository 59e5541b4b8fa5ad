use crate::conf::spec::{EntrypointSpec, ServerSpec, SinkSpec, TailSpec};
use crate::conf::validation::{MAX_COUNT, Severity, validate_spec};
use crate::conf::{CountUnit, Direction, FailurePolicy};
use std::path::{Path, PathBuf};

fn spec() -> EntrypointSpec {
    EntrypointSpec {
        version: 1,
        server: ServerSpec::default(),
        tail: TailSpec {
            files: vec!["/var/log/app.log".to_string()],
            count: 10,
            unit: CountUnit::Lines,
            from: Direction::FromTail,
            header_threshold: 1,
            poll_interval_secs: 1,
            retry_missing: true,
        },
        sink: SinkSpec::default(),
    }
}

fn file() -> &'static Path {
    Path::new("/test/tailpost.toml")
}

#[test]
fn validate_minimum_spec() {
    // Act
    let report = validate_spec(&spec(), file());

    // Assert
    assert!(!report.has_violations());
}

#[test]
fn invalid_version_fails_fast() {
    // Arrange
    let mut spec = spec();
    spec.version = 2;
    spec.tail.files.clear();

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].message, "invalid config version 2");
}

#[test]
fn empty_file_list_is_an_error() {
    // Arrange
    let mut spec = spec();
    spec.tail.files.clear();

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].message, "no files configured");
    assert!(report.errors[0].help.is_some());
}

#[test]
fn blank_file_entry_points_at_its_index() {
    // Arrange
    let mut spec = spec();
    spec.tail.files.push("  ".to_string());

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].origin.index, Some(1));
    assert_eq!(report.errors[0].origin.section, "tail.files");
}

#[test]
fn oversized_count_is_an_error() {
    // Arrange
    let mut spec = spec();
    spec.tail.count = MAX_COUNT + 1;

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.starts_with("invalid count"));
}

#[test]
fn poll_interval_must_be_in_range() {
    for secs in [0, 3601] {
        // Arrange
        let mut spec = spec();
        spec.tail.poll_interval_secs = secs;

        // Act
        let report = validate_spec(&spec, file());

        // Assert
        assert_eq!(report.errors.len(), 1, "poll_interval_secs = {secs}");
    }
}

#[test]
fn zero_count_is_a_warning() {
    // Arrange
    let mut spec = spec();
    spec.tail.count = 0;
    spec.tail.unit = CountUnit::Bytes;

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].severity, Severity::Warning);
}

#[test]
fn destination_must_be_http() {
    // Arrange
    let mut spec = spec();
    spec.sink.destination = Some("udp://collector:514".to_string());

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("unsupported scheme 'udp'"));
}

#[test]
fn destination_must_parse() {
    // Arrange
    let mut spec = spec();
    spec.sink.destination = Some("not a url".to_string());

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn zero_timeout_is_an_error() {
    // Arrange
    let mut spec = spec();
    spec.sink.timeout_ms = 0;

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
}

#[test]
fn fail_policy_without_destination_warns() {
    // Arrange
    let mut spec = spec();
    spec.sink.on_failure = FailurePolicy::Fail;

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert!(report.errors.is_empty());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn pid_file_parent_must_exist() {
    // Arrange
    let mut spec = spec();
    spec.server.pid_file = Some(PathBuf::from("/definitely/not/here/tailpost.pid"));

    // Act
    let report = validate_spec(&spec, file());

    // Assert
    assert_eq!(report.errors.len(), 1);
    assert!(report.errors[0].message.contains("parent directory does not exist"));
}

#[test]
fn plain_rendering_includes_origin_and_help() {
    // Arrange
    let mut spec = spec();
    spec.tail.files.clear();
    let report = validate_spec(&spec, file());

    // Act
    let text = report.render_plain();

    // Assert
    assert!(text.starts_with("/test/tailpost.toml: tail: error: no files configured\n"));
    assert!(text.contains("  help: "));
}
