//! In-memory runtime for tests.
//!
//! `MemoryRuntime` models a directory tree without touching the disk. Paths can
//! be flagged unreadable to exercise the recoverable and fatal error paths of
//! discovery and extraction.

use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Virtual filesystem rooted at a fixed absolute path.
///
/// # Example
///
/// ```rust,ignore
/// use depdash::runtime::test_utils::MemoryRuntime;
///
/// let runtime = MemoryRuntime::new("/project")
///     .with_file("src/a.js", "import b from './b';")
///     .with_file("src/b.js", "");
/// assert_eq!(runtime.root().to_str(), Some("/project"));
/// ```
#[derive(Debug, Clone)]
pub struct MemoryRuntime {
    root: PathBuf,
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

impl MemoryRuntime {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let mut dirs = BTreeSet::new();
        dirs.insert(root.clone());
        Self {
            root,
            files: BTreeMap::new(),
            dirs,
            unreadable: BTreeSet::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a file (path relative to the root); parent directories are created.
    pub fn with_file(mut self, relative: &str, content: impl Into<Vec<u8>>) -> Self {
        let path = self.root.join(relative);
        self.register_parents(&path);
        self.files.insert(path, content.into());
        self
    }

    /// Add an empty directory (path relative to the root).
    pub fn with_dir(mut self, relative: &str) -> Self {
        let path = self.root.join(relative);
        self.register_parents(&path);
        self.dirs.insert(path);
        self
    }

    /// Make reads of a file, or listings of a directory, fail with an I/O error.
    pub fn with_unreadable(mut self, relative: &str) -> Self {
        self.unreadable.insert(self.root.join(relative));
        self
    }

    fn register_parents(&mut self, path: &Path) {
        let mut current = path.parent();
        while let Some(dir) = current {
            if !dir.starts_with(&self.root) {
                break;
            }
            self.dirs.insert(dir.to_path_buf());
            current = dir.parent();
        }
    }

    fn permission_denied(path: &Path) -> RuntimeError {
        RuntimeError::Io(format!("Permission denied: {}", path.display()))
    }
}

#[async_trait]
impl Runtime for MemoryRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        if self.unreadable.contains(path) {
            return Err(Self::permission_denied(path));
        }
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| RuntimeError::FileNotFound(path.to_path_buf()))
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        if self.files.contains_key(path) {
            Ok(FileMetadata { is_dir: false })
        } else if self.dirs.contains(path) {
            Ok(FileMetadata { is_dir: true })
        } else {
            Err(RuntimeError::FileNotFound(path.to_path_buf()))
        }
    }

    async fn read_dir(&self, path: &Path) -> RuntimeResult<Vec<String>> {
        if self.unreadable.contains(path) {
            return Err(Self::permission_denied(path));
        }
        if !self.dirs.contains(path) {
            return Err(RuntimeError::FileNotFound(path.to_path_buf()));
        }

        let children: BTreeSet<String> = self
            .files
            .keys()
            .chain(self.dirs.iter())
            .filter(|child| child.parent() == Some(path))
            .filter_map(|child| child.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect();

        Ok(children.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_dir_lists_direct_children_only() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("a.js", "")
            .with_file("lib/b.js", "")
            .with_dir("empty");

        let entries = runtime.read_dir(Path::new("/p")).await.unwrap();
        assert_eq!(entries, vec!["a.js", "empty", "lib"]);

        let lib = runtime.read_dir(Path::new("/p/lib")).await.unwrap();
        assert_eq!(lib, vec!["b.js"]);
    }

    #[tokio::test]
    async fn test_unreadable_paths() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("lib/b.js", "x")
            .with_unreadable("lib/b.js")
            .with_unreadable("lib");

        assert!(matches!(
            runtime.read_file(Path::new("/p/lib/b.js")).await,
            Err(RuntimeError::Io(_))
        ));
        assert!(matches!(
            runtime.read_dir(Path::new("/p/lib")).await,
            Err(RuntimeError::Io(_))
        ));
        // metadata still works so discovery can tell files from directories
        assert!(runtime.metadata(Path::new("/p/lib")).await.unwrap().is_dir);
    }
}
