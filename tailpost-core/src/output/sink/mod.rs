//! Content sinks: where forwarded bytes go besides the primary output.

mod http;
mod memory;
mod null;

pub use http::HttpSink;
pub use memory::MemorySink;
pub use null::NullSink;

use crate::conf::SinkConfig;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    /// Delivery failed this time; later chunks may still succeed.
    #[error("delivery failed: {reason}")]
    Transient { reason: String },

    /// The destination can never accept content (e.g. it does not exist).
    #[error("unrecoverable sink failure: {reason}")]
    Fatal { reason: String },
}

impl SinkError {
    pub fn transient(reason: impl Into<String>) -> Self {
        Self::Transient {
            reason: reason.into(),
        }
    }

    pub fn fatal(reason: impl Into<String>) -> Self {
        Self::Fatal {
            reason: reason.into(),
        }
    }
}

/// Receives each dispatched chunk, fire-and-forget from the engine's view.
#[async_trait]
pub trait ContentSink: Send + Sync {
    /// Delivers `bytes` read from `source`.
    async fn send(&self, source: &Path, bytes: Bytes) -> Result<(), SinkError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Builds the sink for a configuration: HTTP when a destination is set.
pub fn build_sink(config: &SinkConfig) -> Result<Box<dyn ContentSink>, SinkError> {
    match &config.destination {
        Some(url) => Ok(Box::new(HttpSink::new(url.clone(), config.timeout)?)),
        None => Ok(Box::new(NullSink)),
    }
}
