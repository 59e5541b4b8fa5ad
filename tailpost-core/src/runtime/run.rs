use crate::conf::RuntimeConfig;
use crate::output::{Dispatcher, build_sink};
use crate::runtime::{ShutdownHandle, pid};
use crate::tail::{EngineError, ExitStatus, Session};
use anyhow::{Context, Result};
use std::io::{self, Write};
use tokio::sync::watch;

/// Tails the configured files to stdout until SIGINT/SIGTERM.
///
/// Owns the process concerns: the pid file, a single-threaded Tokio runtime,
/// and the signal handler. Per-file failures end up in the returned status;
/// fatal ones are returned as errors.
pub fn run(config: RuntimeConfig) -> Result<ExitStatus> {
    // Best-effort, as the tail itself does not depend on it.
    if let Some(pid_file) = &config.server.pid_file {
        match pid::write_pid(pid_file) {
            Ok(()) => tracing::info!(pid_file = %pid_file.display(), "pid file written"),
            Err(e) => {
                tracing::warn!(error = %e, pid_file = %pid_file.display(), "failed to write pid file; continuing")
            }
        }
    }

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build Tokio runtime")?;

    let shutdown = ShutdownHandle::new();
    let result = rt.block_on(async {
        // Registered before the initial phase, which may run long without yielding.
        match shutdown.signal_listener() {
            Ok(listener) => {
                tokio::spawn(listener);
            }
            Err(e) => tracing::warn!(error = %e, "signal handler unavailable"),
        }

        tail_files(&config, io::stdout().lock(), shutdown.subscribe()).await
    });

    if let Some(pid_file) = &config.server.pid_file {
        pid::remove_pid(pid_file);
    }

    let (status, _) = result?;
    Ok(status)
}

/// Emits the initial windows of `config.files` to `out`, then follows them
/// until `shutdown` fires. Returns the exit status and the output writer.
pub async fn tail_files<W: Write>(
    config: &RuntimeConfig,
    out: W,
    shutdown: watch::Receiver<bool>,
) -> Result<(ExitStatus, W), EngineError> {
    let sink = build_sink(&config.sink)?;
    tracing::info!(
        sink = sink.name(),
        files = config.files.len(),
        "starting tail"
    );

    let dispatcher = Dispatcher::new(out, sink, config.sink.on_failure);
    let mut session = Session::open(config.tail.clone(), &config.files, dispatcher)?;
    session.emit_initial().await?;
    session.follow(shutdown).await?;

    let status = session.exit_status();
    tracing::info!(success = status.is_success(), "tail finished");
    Ok((status, session.into_dispatcher().into_output()))
}
