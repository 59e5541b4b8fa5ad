use crate::conf::{Direction, TailConfig};
use crate::output::{Banners, Dispatcher};
use crate::tail::{
    EngineError, ExitStatus, FileHandle, Registry, SkipFilter, TailBuffer, TrackedFile, read_full,
    tail_window,
};
use std::io::{Seek, SeekFrom, Write};
use std::path::PathBuf;

/// One tailing run: owns the tracked files, the tail buffer and the output.
pub struct Session<W> {
    pub(super) config: TailConfig,
    pub(super) registry: Registry,
    pub(super) buffer: TailBuffer,
    pub(super) dispatcher: Dispatcher<W>,
    pub(super) status: ExitStatus,
}

impl<W: Write> Session<W> {
    /// Opens `paths` and prepares the session.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoFiles` if none of the paths could be registered.
    pub fn open(
        config: TailConfig,
        paths: &[PathBuf],
        mut dispatcher: Dispatcher<W>,
    ) -> Result<Self, EngineError> {
        let mut status = ExitStatus::default();
        let registry = Registry::open(paths, config.retry_missing, &mut status)?;
        dispatcher.set_banners(Banners::new(registry.len() > config.header_threshold));

        tracing::info!(
            files = registry.len(),
            open = registry.iter().filter(|f| f.is_open()).count(),
            count = config.count,
            unit = ?config.unit,
            direction = ?config.direction,
            "session opened"
        );

        Ok(Self {
            config,
            registry,
            buffer: TailBuffer::new(),
            dispatcher,
            status,
        })
    }

    /// Emits the initial content of every open file, in registration order.
    ///
    /// Per-file failures are logged and recorded in the exit status; only
    /// fatal errors are returned.
    pub async fn emit_initial(&mut self) -> Result<(), EngineError> {
        let Self {
            config,
            registry,
            buffer,
            dispatcher,
            status,
        } = self;

        for file in registry.iter_mut() {
            let result = match config.direction {
                Direction::FromTail => emit_window(file, config, buffer, dispatcher).await,
                Direction::FromTop => emit_from_top(file, config, buffer, dispatcher).await,
            };
            absorb(result, status)?;
        }

        buffer.reset_scratch();
        Ok(())
    }

    pub fn config(&self) -> &TailConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Dispatcher<W> {
        &self.dispatcher
    }

    pub fn into_dispatcher(self) -> Dispatcher<W> {
        self.dispatcher
    }

    pub fn exit_status(&self) -> ExitStatus {
        self.status
    }
}

/// Fatal errors pass through; anything else is logged and marks the run failed.
pub(super) fn absorb<T: Default>(
    result: Result<T, EngineError>,
    status: &mut ExitStatus,
) -> Result<T, EngineError> {
    match result {
        Ok(v) => Ok(v),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            tracing::error!(error = %e, "file processing failed");
            status.record_failure();
            Ok(T::default())
        }
    }
}

async fn emit_window<W: Write>(
    file: &mut TrackedFile,
    config: &TailConfig,
    buffer: &mut TailBuffer,
    dispatcher: &mut Dispatcher<W>,
) -> Result<(), EngineError> {
    let FileHandle::Open { file: handle, .. } = &mut file.handle else {
        return Ok(());
    };

    match tail_window(handle, config.count, config.unit, buffer) {
        Ok(end) => file.offset = end,
        Err(e) => {
            // Follow from the end rather than replaying the whole file.
            file.offset = handle.seek(SeekFrom::End(0)).unwrap_or(file.offset);
            return Err(EngineError::from_window(&file.path, e));
        }
    }

    tracing::debug!(
        path = %file.path.display(),
        bytes = buffer.len(),
        offset = file.offset,
        "initial window ready"
    );

    let banner = dispatcher.begin_block(file.index, &file.path);
    dispatcher
        .dispatch(file.index, &file.path, buffer.as_slice())
        .await?;
    banner
}

async fn emit_from_top<W: Write>(
    file: &mut TrackedFile,
    config: &TailConfig,
    buffer: &mut TailBuffer,
    dispatcher: &mut Dispatcher<W>,
) -> Result<(), EngineError> {
    let FileHandle::Open { file: handle, .. } = &mut file.handle else {
        return Ok(());
    };

    let banner = dispatcher.begin_block(file.index, &file.path);
    let mut filter = SkipFilter::new(config.count, config.unit);

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

        let out = filter.filter(&scratch[..n]);
        dispatcher.dispatch(file.index, &file.path, out).await?;
    }

    banner
}
