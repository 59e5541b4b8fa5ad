use crate::output::SinkError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no files")]
    NoFiles,

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error on {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("write error on output: {source}")]
    Write {
        #[source]
        source: io::Error,
    },

    #[error("out of memory growing tail buffer to {requested} bytes")]
    Allocation { requested: usize },

    #[error("sink failure: {0}")]
    Sink(#[from] SinkError),
}

impl EngineError {
    /// Fatal errors abort the run. Everything else is isolated to one file
    /// (or one block of output) and only affects the exit status.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::NoFiles | Self::Allocation { .. } | Self::Sink(_) => true,
            Self::Open { .. } | Self::Read { .. } | Self::Write { .. } => false,
        }
    }

    pub(crate) fn from_window(path: impl Into<PathBuf>, err: WindowError) -> Self {
        match err {
            WindowError::Read(source) => Self::Read {
                path: path.into(),
                source,
            },
            WindowError::Allocation { requested } => Self::Allocation { requested },
        }
    }
}

/// Failures while computing a window, before the file path is known.
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("read error: {0}")]
    Read(#[from] io::Error),

    #[error("out of memory growing tail buffer to {requested} bytes")]
    Allocation { requested: usize },
}
