use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tailpost_core::conf::{RuntimeConfig, ServerConfig, SinkConfig, TailConfig};
use url::Url;

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(name)
}

/// A runtime config polling every 20ms, bypassing file-level validation so
/// tests do not wait whole seconds between ticks.
pub fn runtime_config(files: Vec<PathBuf>, destination: Option<Url>) -> RuntimeConfig {
    RuntimeConfig {
        files,
        server: ServerConfig::default(),
        tail: TailConfig {
            poll_interval: Duration::from_millis(20),
            ..TailConfig::default()
        },
        sink: SinkConfig {
            destination,
            timeout: Duration::from_secs(2),
            ..SinkConfig::default()
        },
    }
}

pub fn append(path: &Path, bytes: &str) {
    let mut file = OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .unwrap();
    file.write_all(bytes.as_bytes()).unwrap();
}
