use std::fs::Metadata;

/// Filesystem identity of an open file: (device, inode).
///
/// Only compared for equality, to notice that a path now names a different file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileIdentity {
    pub dev: u64,
    pub ino: u64,
}

impl FileIdentity {
    #[cfg(unix)]
    pub fn from_metadata(metadata: &Metadata) -> Self {
        use std::os::unix::fs::MetadataExt;
        Self {
            dev: metadata.dev(),
            ino: metadata.ino(),
        }
    }

    /// Without inode numbers every file looks the same; replacement is then
    /// only noticed through disappearance.
    #[cfg(not(unix))]
    pub fn from_metadata(_metadata: &Metadata) -> Self {
        Self { dev: 0, ino: 0 }
    }
}
