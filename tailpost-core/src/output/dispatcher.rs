use crate::conf::FailurePolicy;
use crate::output::{Banners, ContentSink, SinkError};
use crate::tail::EngineError;
use bytes::Bytes;
use std::io::Write;
use std::path::Path;

/// Sends produced byte ranges to the primary output and to the content sink.
///
/// Content is never altered or buffered. Banners only go to the primary output.
pub struct Dispatcher<W> {
    out: W,
    sink: Box<dyn ContentSink>,
    banners: Banners,
    on_failure: FailurePolicy,
}

impl<W: Write> Dispatcher<W> {
    pub fn new(out: W, sink: Box<dyn ContentSink>, on_failure: FailurePolicy) -> Self {
        Self {
            out,
            sink,
            banners: Banners::default(),
            on_failure,
        }
    }

    pub(crate) fn set_banners(&mut self, banners: Banners) {
        self.banners = banners;
    }

    /// Starts the initial block of a file: writes its banner, if banners are on.
    pub fn begin_block(&mut self, index: usize, path: &Path) -> Result<(), EngineError> {
        if let Some(banner) = self.banners.force(index, path) {
            self.write_all(banner.as_bytes())?;
            self.out
                .flush()
                .map_err(|source| EngineError::Write { source })?;
        }
        Ok(())
    }

    /// Writes `bytes` (banner first if the source changed) and forwards them.
    ///
    /// Both targets are attempted. A sink failure is returned only when it is
    /// fatal, or the failure policy escalates it; a write failure is returned
    /// otherwise.
    pub async fn dispatch(
        &mut self,
        index: usize,
        path: &Path,
        bytes: &[u8],
    ) -> Result<(), EngineError> {
        if bytes.is_empty() {
            return Ok(());
        }
        let written = self.write_block(index, path, bytes);
        self.forward(path, bytes).await?;
        written
    }

    fn write_block(&mut self, index: usize, path: &Path, bytes: &[u8]) -> Result<(), EngineError> {
        if let Some(banner) = self.banners.before_block(index, path) {
            self.write_all(banner.as_bytes())?;
        }
        self.write_all(bytes)?;
        self.out
            .flush()
            .map_err(|source| EngineError::Write { source })
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), EngineError> {
        self.out
            .write_all(bytes)
            .map_err(|source| EngineError::Write { source })
    }

    async fn forward(&self, path: &Path, bytes: &[u8]) -> Result<(), EngineError> {
        match self.sink.send(path, Bytes::copy_from_slice(bytes)).await {
            Ok(()) => Ok(()),
            Err(e @ SinkError::Fatal { .. }) => Err(e.into()),
            Err(e) if self.on_failure == FailurePolicy::Fail => Err(e.into()),
            Err(e) => {
                tracing::warn!(
                    sink = self.sink.name(),
                    path = %path.display(),
                    bytes = bytes.len(),
                    error = %e,
                    "sink delivery failed; chunk dropped"
                );
                Ok(())
            }
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
