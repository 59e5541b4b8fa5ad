use crate::output::sink::{ContentSink, SinkError};
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Collects forwarded chunks in memory.
///
/// Clones share the same storage, so a clone handed to a dispatcher can be
/// inspected afterwards. An optional failure makes every send return it.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    chunks: Arc<Mutex<Vec<(PathBuf, Bytes)>>>,
    failure: Option<SinkError>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(failure: SinkError) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    pub fn chunks(&self) -> Vec<(PathBuf, Bytes)> {
        self.chunks
            .lock()
            .map(|chunks| chunks.clone())
            .unwrap_or_default()
    }

    /// All delivered bytes, concatenated in delivery order.
    pub fn contents(&self) -> Vec<u8> {
        self.chunks()
            .iter()
            .flat_map(|(_, bytes)| bytes.iter().copied())
            .collect()
    }
}

#[async_trait]
impl ContentSink for MemorySink {
    async fn send(&self, source: &Path, bytes: Bytes) -> Result<(), SinkError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        if let Ok(mut chunks) = self.chunks.lock() {
            chunks.push((source.to_path_buf(), bytes));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
