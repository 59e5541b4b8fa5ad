use crate::output::Dispatcher;
use crate::tail::session::absorb;
use crate::tail::{
    EngineError, FileHandle, FileIdentity, Session, TailBuffer, TrackedFile, read_full,
};
use std::fs;
use std::io::{Seek, SeekFrom, Write};
use tokio::sync::watch;

/// What a tick found for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileState {
    Open,
    Missing,
    /// The path now names a different file (or a file that just appeared),
    /// which has been reopened from its start.
    Replaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickOutcome {
    pub index: usize,
    pub state: FileState,
    pub truncated: bool,
    pub bytes_read: u64,
}

impl<W: Write> Session<W> {
    /// Runs one follow iteration over every tracked file in order.
    ///
    /// # Errors
    ///
    /// Only fatal errors are returned; per-file failures are logged and
    /// recorded in the exit status.
    pub async fn tick(&mut self) -> Result<Vec<TickOutcome>, EngineError> {
        let Self {
            config,
            registry,
            buffer,
            dispatcher,
            status,
        } = self;

        let mut outcomes = Vec::with_capacity(registry.len());
        for file in registry.iter_mut() {
            let state = if config.retry_missing {
                check_replaced(file)
            } else if file.is_open() {
                FileState::Open
            } else {
                FileState::Missing
            };

            if !file.is_open() {
                outcomes.push(TickOutcome {
                    index: file.index,
                    state: FileState::Missing,
                    truncated: false,
                    bytes_read: 0,
                });
                continue;
            }

            let truncated = check_truncated(file);
            let bytes_read = absorb(read_appended(file, buffer, dispatcher).await, status)?;

            outcomes.push(TickOutcome {
                index: file.index,
                state,
                truncated,
                bytes_read,
            });
        }

        Ok(outcomes)
    }

    /// Polls forever, sleeping one interval between ticks, until `shutdown`
    /// flips to `true` or its sender goes away.
    ///
    /// A shutdown during the sleep is observed immediately; a tick in
    /// progress always completes.
    pub async fn follow(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<(), EngineError> {
        let interval = self.config.poll_interval;
        tracing::info!(
            files = self.registry.len(),
            poll_interval_ms = interval.as_millis() as u64,
            "following files"
        );

        loop {
            if *shutdown.borrow() {
                break;
            }

            tokio::select! {
                changed = shutdown.changed() => {
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                    continue;
                }
                _ = tokio::time::sleep(interval) => {}
            }

            self.tick().await?;
        }

        tracing::info!("follow stopped");
        Ok(())
    }
}

/// Reopens the path if it no longer names the open file, or if nothing is open.
fn check_replaced(file: &mut TrackedFile) -> FileState {
    let stale = match &file.handle {
        FileHandle::Closed => true,
        FileHandle::Open { file: handle, .. } => {
            match (handle.metadata(), fs::metadata(&file.path)) {
                (Ok(open), Ok(on_disk)) => {
                    FileIdentity::from_metadata(&open) != FileIdentity::from_metadata(&on_disk)
                }
                _ => true,
            }
        }
    };
    if !stale {
        return FileState::Open;
    }

    let previous = file.identity();
    file.close();

    match file.reopen() {
        Ok(()) => {
            match previous {
                Some(previous) => tracing::info!(
                    path = %file.path.display(),
                    ?previous,
                    current = ?file.identity(),
                    "file has been replaced; following new file"
                ),
                None => tracing::info!(
                    path = %file.path.display(),
                    "file has appeared; following new file"
                ),
            }
            FileState::Replaced
        }
        Err(e) => {
            if previous.is_some() {
                tracing::info!(
                    path = %file.path.display(),
                    error = %e,
                    "file has become inaccessible"
                );
            }
            FileState::Missing
        }
    }
}

/// Rewinds to the start if the file shrank below the read offset.
///
/// Files reporting size 0 are left alone; for pseudo-files the size says
/// nothing about the content.
fn check_truncated(file: &mut TrackedFile) -> bool {
    let FileHandle::Open { file: handle, .. } = &mut file.handle else {
        return false;
    };
    let size = match handle.metadata() {
        Ok(metadata) => metadata.len(),
        Err(_) => return false,
    };
    if size == 0 || size >= file.offset {
        return false;
    }

    match handle.seek(SeekFrom::Start(0)) {
        Ok(_) => {
            tracing::info!(
                path = %file.path.display(),
                size,
                offset = file.offset,
                "file truncated"
            );
            file.offset = 0;
            true
        }
        Err(e) => {
            tracing::warn!(path = %file.path.display(), error = %e, "cannot rewind truncated file");
            false
        }
    }
}

/// Reads and dispatches everything appended since the last read.
async fn read_appended<W: Write>(
    file: &mut TrackedFile,
    buffer: &mut TailBuffer,
    dispatcher: &mut Dispatcher<W>,
) -> Result<u64, EngineError> {
    let FileHandle::Open { file: handle, .. } = &mut file.handle else {
        return Ok(0);
    };

    let mut total = 0;
    loop {
        let scratch = buffer
            .scratch_mut()
            .map_err(|e| EngineError::from_window(&file.path, e))?;
        let n = read_full(handle, scratch).map_err(|source| EngineError::Read {
            path: file.path.clone(),
            source,
        })?;
        if n == 0 {
            break;
        }
        file.offset += n as u64;
        total += n as u64;
        dispatcher.dispatch(file.index, &file.path, &scratch[..n]).await?;
    }

    Ok(total)
}
