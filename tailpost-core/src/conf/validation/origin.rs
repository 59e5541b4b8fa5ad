use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where in the configuration a validation issue was found.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct Origin {
    pub(crate) file: PathBuf,
    pub(crate) section: String,
    pub(crate) index: Option<usize>,
}

impl Origin {
    pub fn new(file: &Path, section: &str, index: Option<usize>) -> Self {
        Self {
            file: file.to_path_buf(),
            section: section.to_owned(),
            index,
        }
    }

    pub fn file(&self) -> &Path {
        &self.file
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "{}: {}[{}]", self.file.display(), self.section, i),
            None => write!(f, "{}: {}", self.file.display(), self.section),
        }
    }
}
