//! Error types for the sharenv server
//!
//! Provides unified error handling using thiserror. None of these reach an
//! HTTP client: request paths log them and omit the affected item.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

// == Sharenv Error Enum ==
/// Unified error type for the sharenv server.
#[derive(Error, Debug)]
pub enum SharenvError {
    /// Reading or listing a path failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// File contents are not valid UTF-8
    #[error("{0} is not valid UTF-8")]
    InvalidUtf8(PathBuf),

    /// The file-system watcher could not be set up
    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl SharenvError {
    /// Wraps an I/O error together with the path it occurred on.
    pub fn io(path: &Path, source: io::Error) -> Self {
        SharenvError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns true when the underlying cause is a missing file.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SharenvError::Io { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }
}

// == Result Type Alias ==
/// Convenience Result type for the sharenv server.
pub type Result<T> = std::result::Result<T, SharenvError>;
