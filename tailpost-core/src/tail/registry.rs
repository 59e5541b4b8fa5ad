use crate::tail::{EngineError, ExitStatus, FileIdentity};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

/// State of a tracked file's handle.
#[derive(Debug)]
pub enum FileHandle {
    Open { file: File, identity: FileIdentity },
    Closed,
}

/// One input file, in request order.
#[derive(Debug)]
pub struct TrackedFile {
    pub(crate) index: usize,
    pub(crate) path: PathBuf,
    pub(crate) handle: FileHandle,
    /// Offset of the next byte to read.
    pub(crate) offset: u64,
}

impl TrackedFile {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn is_open(&self) -> bool {
        matches!(self.handle, FileHandle::Open { .. })
    }

    pub fn identity(&self) -> Option<FileIdentity> {
        match &self.handle {
            FileHandle::Open { identity, .. } => Some(*identity),
            FileHandle::Closed => None,
        }
    }

    /// Opens the path read-only and records its identity. Reading starts at 0.
    pub(crate) fn reopen(&mut self) -> io::Result<()> {
        let (file, identity) = open_with_identity(&self.path)?;
        self.handle = FileHandle::Open { file, identity };
        self.offset = 0;
        Ok(())
    }

    pub(crate) fn close(&mut self) {
        self.handle = FileHandle::Closed;
    }
}

fn open_with_identity(path: &Path) -> io::Result<(File, FileIdentity)> {
    let file = File::open(path)?;
    let identity = FileIdentity::from_metadata(&file.metadata()?);
    Ok((file, identity))
}

/// The set of files a session tails.
#[derive(Debug)]
pub struct Registry {
    files: Vec<TrackedFile>,
}

impl Registry {
    /// Opens every path in order.
    ///
    /// A path that fails to open is kept as `Closed` when `retry_missing` is
    /// set, so the follow loop can pick it up later. Otherwise the failure is
    /// recorded in `status` and the path is dropped.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::NoFiles` if nothing could be registered.
    pub fn open(
        paths: &[PathBuf],
        retry_missing: bool,
        status: &mut ExitStatus,
    ) -> Result<Self, EngineError> {
        let mut files = Vec::with_capacity(paths.len());

        for path in paths {
            let handle = match open_with_identity(path) {
                Ok((file, identity)) => {
                    tracing::debug!(path = %path.display(), ?identity, "file opened");
                    FileHandle::Open { file, identity }
                }
                Err(e) if retry_missing => {
                    tracing::warn!(path = %path.display(), error = %e, "cannot open file; will retry");
                    FileHandle::Closed
                }
                Err(e) => {
                    let err = EngineError::Open {
                        path: path.clone(),
                        source: e,
                    };
                    tracing::error!(error = %err, "cannot open file");
                    status.record_failure();
                    continue;
                }
            };

            files.push(TrackedFile {
                index: files.len(),
                path: path.clone(),
                handle,
                offset: 0,
            });
        }

        if files.is_empty() {
            return Err(EngineError::NoFiles);
        }

        Ok(Self { files })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackedFile> {
        self.files.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut TrackedFile> {
        self.files.iter_mut()
    }

    pub fn get(&self, index: usize) -> Option<&TrackedFile> {
        self.files.get(index)
    }
}
