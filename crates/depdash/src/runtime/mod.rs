//! Filesystem capability used by discovery and import extraction.
//!
//! The analysis core never touches `std::fs` directly. Everything it needs
//! from the platform (listing directories, reading files, stat) goes through
//! the `Runtime` trait so that tests can swap in an in-memory tree and
//! embedders can plug in their own filesystem.

mod native;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use native::NativeRuntime;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// File or directory not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

/// File metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileMetadata {
    /// Whether this is a directory
    pub is_dir: bool,
}

/// Platform runtime trait.
///
/// Implementations must be cheap to share behind an `Arc`; the analyzer holds
/// one for the duration of a run and calls it sequentially, one file at a
/// time, in discovery order.
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// List the entry names of a directory (names only, not full paths)
    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>>;

    /// Read a file and decode it as UTF-8.
    async fn read_to_string(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path).await?;
        String::from_utf8(bytes).map_err(|e| RuntimeError::Other(format!("Invalid UTF-8: {}", e)))
    }
}
