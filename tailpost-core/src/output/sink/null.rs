use crate::output::sink::{ContentSink, SinkError};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;

/// Discards everything. Used when no destination is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

#[async_trait]
impl ContentSink for NullSink {
    async fn send(&self, _source: &Path, _bytes: Bytes) -> Result<(), SinkError> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
