use crate::conf::discover::discover_files;
use crate::conf::runtime::{RuntimeConfig, ServerConfig, SinkConfig, TailConfig};
use crate::conf::spec::EntrypointSpec;
use crate::conf::ConfigError;
use std::time::Duration;
use url::Url;

/// Lower a validated spec into the runtime representation.
///
/// Glob entries are expanded here, so the file list is fixed for the session.
pub(crate) fn lower_config(spec: EntrypointSpec) -> Result<RuntimeConfig, ConfigError> {
    let EntrypointSpec {
        server, tail, sink, ..
    } = spec;

    let files = discover_files(&tail.files, tail.retry_missing)?;

    let destination = sink
        .destination
        .as_deref()
        .map(|d| {
            Url::parse(d).map_err(|source| ConfigError::InvalidDestination {
                destination: d.to_string(),
                source,
            })
        })
        .transpose()?;

    Ok(RuntimeConfig {
        files,
        server: ServerConfig {
            pid_file: server.pid_file,
        },
        tail: TailConfig {
            count: tail.count,
            unit: tail.unit,
            direction: tail.from,
            header_threshold: tail.header_threshold,
            poll_interval: Duration::from_secs(tail.poll_interval_secs),
            retry_missing: tail.retry_missing,
        },
        sink: SinkConfig {
            destination,
            timeout: Duration::from_millis(sink.timeout_ms),
            on_failure: sink.on_failure,
        },
    })
}
