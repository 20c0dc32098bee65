//! File Source Module
//!
//! Reads variable and alias files. The store talks to the file system only
//! through [`FileSource`], so tests can swap in an in-memory tree.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::{Result, SharenvError};

/// File-system accessors needed by the cache.
pub trait FileSource: Send + Sync {
    /// Reads the raw bytes of a file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Lists the names of regular files directly inside `dir`.
    fn list_files(&self, dir: &Path) -> Result<Vec<String>>;

    /// Returns true if `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Creates `dir` and any missing parents.
    fn create_dir_all(&self, dir: &Path) -> Result<()>;
}

/// The local disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskSource;

impl FileSource for DiskSource {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| SharenvError::io(path, e))
    }

    fn list_files(&self, dir: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(dir).map_err(|e| SharenvError::io(dir, e))? {
            let entry = entry.map_err(|e| SharenvError::io(dir, e))?;
            // Follows symlinks, so a link to a regular file counts.
            let is_file = fs::metadata(entry.path())
                .map(|m| m.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir).map_err(|e| SharenvError::io(dir, e))
    }
}

// == Utility Functions ==
/// SHA-256 of `bytes` as lowercase hex.
pub fn content_hash(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// Splits file contents into trimmed, non-empty lines.
pub fn parse_lines(path: &Path, bytes: &[u8]) -> Result<Vec<String>> {
    let text =
        std::str::from_utf8(bytes).map_err(|_| SharenvError::InvalidUtf8(path.to_path_buf()))?;

    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}
