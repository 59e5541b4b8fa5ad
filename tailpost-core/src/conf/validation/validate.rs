use crate::conf::spec::{Direction, EntrypointSpec, FailurePolicy, ServerSpec, SinkSpec, TailSpec};
use crate::conf::validation::Origin;
use crate::conf::validation::report::ValidationReport;
use std::path::Path;
use url::Url;

/// Upper bound for `tail.count`; larger windows are almost certainly typos.
pub const MAX_COUNT: u64 = 1 << 40;

pub const MAX_POLL_INTERVAL_SECS: u64 = 3600;

/// Validate everything that exists in a fully parsed config.
///
/// Version validation fails fast, because it invalidates the entire config model.
pub fn validate_spec(spec: &EntrypointSpec, file: &Path) -> ValidationReport {
    let mut report = ValidationReport::default();

    if spec.version != 1 {
        report.error(
            format!("invalid config version {}", spec.version),
            &Origin::new(file, "version", None),
            None,
        );
        return report;
    }

    validate_server(&spec.server, &Origin::new(file, "server", None), &mut report);
    validate_tail(&spec.tail, file, &mut report);
    validate_sink(&spec.sink, &Origin::new(file, "sink", None), &mut report);
    report
}

fn validate_server(server: &ServerSpec, origin: &Origin, report: &mut ValidationReport) {
    let Some(pid_file) = &server.pid_file else {
        return;
    };
    let Some(parent) = pid_file.parent() else {
        return;
    };
    if parent.as_os_str().is_empty() {
        return;
    }

    if !parent.exists() {
        report.error(
            format!(
                "invalid pid file - parent directory does not exist: {}",
                pid_file.display()
            ),
            origin,
            None,
        );
    } else if !parent.is_dir() {
        report.error(
            format!(
                "invalid pid file - parent path exists but is not a directory: {}",
                pid_file.display()
            ),
            origin,
            None,
        );
    }
}

fn validate_tail(tail: &TailSpec, file: &Path, report: &mut ValidationReport) {
    let origin = Origin::new(file, "tail", None);

    if tail.files.is_empty() {
        report.no_files(&origin);
    }
    for (i, entry) in tail.files.iter().enumerate() {
        if entry.trim().is_empty() {
            report.empty_file_entry(&Origin::new(file, "tail.files", Some(i)));
        }
    }

    if tail.count > MAX_COUNT {
        report.invalid_count(tail.count, MAX_COUNT, &origin);
    }

    if tail.poll_interval_secs == 0 || tail.poll_interval_secs > MAX_POLL_INTERVAL_SECS {
        report.invalid_poll_interval(tail.poll_interval_secs, MAX_POLL_INTERVAL_SECS, &origin);
    }

    if tail.count == 0 {
        match tail.from {
            Direction::FromTail => report.zero_count(&origin),
            Direction::FromTop => report.zero_count_from_top(&origin),
        }
    }
}

fn validate_sink(sink: &SinkSpec, origin: &Origin, report: &mut ValidationReport) {
    if sink.timeout_ms == 0 {
        report.invalid_timeout(origin);
    }

    let Some(destination) = &sink.destination else {
        if sink.on_failure == FailurePolicy::Fail {
            report.fail_policy_without_destination(origin);
        }
        return;
    };

    match Url::parse(destination) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => report.invalid_destination(
            destination,
            &format!("unsupported scheme '{}'", url.scheme()),
            origin,
        ),
        Err(e) => report.invalid_destination(destination, &e.to_string(), origin),
    }
}
