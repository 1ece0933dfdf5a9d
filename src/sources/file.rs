//! File document source.
//!
//! Reads the whole file in one call. A missing or unreadable file is a
//! `DecodeError::Io` carrying the path.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::DocumentSource;
use crate::error::DecodeError;

/// Source that reads a document from a file path.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Create a new `FileSource` for an absolute or relative path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Vec<u8>, DecodeError> {
        trace!(target: "corel::sources", path = %self.path.display(), "Reading document file");
        let bytes = fs::read(&self.path).map_err(|source| DecodeError::Io {
            path: self.path.clone(),
            source,
        })?;
        debug!(
            target: "corel::sources",
            path = %self.path.display(),
            bytes = bytes.len(),
            "Read document file"
        );
        Ok(bytes)
    }
}
