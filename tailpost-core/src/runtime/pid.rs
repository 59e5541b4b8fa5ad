use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Writes the current process id to `path`.
pub fn write_pid<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, format!("{}\n", std::process::id()))
        .with_context(|| format!("failed to write pid file {}", path.display()))
}

/// Removes a pid file (best-effort).
pub fn remove_pid<P: AsRef<Path>>(path: P) {
    let path = path.as_ref();
    if let Err(e) = fs::remove_file(path) {
        tracing::debug!(pid_file = %path.display(), error = %e, "pid file not removed");
    }
}
