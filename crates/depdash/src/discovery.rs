//! Module discovery.
//!
//! Walks the scan root through the [`Runtime`], pruning hidden entries and
//! dependency-manager directories, and records every file with a recognized
//! source extension.
//!
//! Lookups are two-level: a canonical table from [`ModuleId`] to the physical
//! file backing it, plus an alias table from every accepted spelling (with and
//! without extension) to the canonical id. When two files collapse onto the
//! same id (`a.js` and `a.ts`), the first one discovered wins and the other is
//! kept in [`ModuleMap::shadowed`] so the collision stays visible.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::AnalyzerConfig;
use crate::module_id::{ModuleId, normalize_separators};
use crate::runtime::Runtime;
use crate::{Error, Result};

/// A discovered source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleFile {
    /// Canonical identifier (extension stripped).
    pub id: ModuleId,
    /// Root-relative path with its extension, `/`-separated.
    pub relative_path: String,
    /// Absolute path on the runtime's filesystem.
    pub absolute_path: PathBuf,
    /// Extension without the leading dot.
    pub extension: String,
}

/// Discovered modules keyed by canonical id, in discovery order.
#[derive(Debug, Clone, Default)]
pub struct ModuleMap {
    root: PathBuf,
    files: IndexMap<ModuleId, ModuleFile, FxBuildHasher>,
    aliases: IndexMap<String, ModuleId, FxBuildHasher>,
    shadowed: Vec<ModuleFile>,
}

impl ModuleMap {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Register a file. Returns `false` when its id was already taken.
    pub fn insert(&mut self, file: ModuleFile) -> bool {
        self.aliases
            .entry(file.relative_path.clone())
            .or_insert_with(|| file.id.clone());
        self.aliases
            .entry(file.id.as_str().to_string())
            .or_insert_with(|| file.id.clone());

        if self.files.contains_key(&file.id) {
            self.shadowed.push(file);
            return false;
        }
        self.files.insert(file.id.clone(), file);
        true
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of canonical modules.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of recognized source files on disk, shadowed ones included.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.shadowed.len()
    }

    pub fn get(&self, id: &ModuleId) -> Option<&ModuleFile> {
        self.files.get(id)
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.files.contains_key(id)
    }

    /// Canonical id for any accepted spelling (`src/a`, `src/a.ts`).
    pub fn canonical(&self, spelling: &str) -> Option<&ModuleId> {
        self.aliases.get(spelling)
    }

    /// File backing any accepted spelling.
    pub fn lookup(&self, spelling: &str) -> Option<&ModuleFile> {
        self.canonical(spelling).and_then(|id| self.files.get(id))
    }

    /// Canonical files in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &ModuleFile> {
        self.files.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModuleId> {
        self.files.keys()
    }

    /// Every accepted spelling, in registration order.
    pub fn alias_keys(&self) -> impl Iterator<Item = &str> {
        self.aliases.keys().map(String::as_str)
    }

    /// Files that lost the first-writer race for their id.
    pub fn shadowed(&self) -> &[ModuleFile] {
        &self.shadowed
    }
}

/// Recursive source-file enumerator.
pub struct ModuleDiscoverer<'a> {
    config: &'a AnalyzerConfig,
}

impl<'a> ModuleDiscoverer<'a> {
    pub fn new(config: &'a AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Enumerate the modules under `root`.
    ///
    /// Entries are visited depth-first in sorted name order. A directory that
    /// cannot be listed aborts discovery with [`Error::ReadDir`].
    pub async fn discover(&self, root: &Path, runtime: &dyn Runtime) -> Result<ModuleMap> {
        let root_meta = runtime
            .metadata(root)
            .await
            .map_err(|e| Error::InvalidRoot {
                path: root.to_path_buf(),
                reason: e.to_string(),
            })?;
        if !root_meta.is_dir {
            return Err(Error::InvalidRoot {
                path: root.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        let mut modules = ModuleMap::new(root);
        let mut skipped = 0usize;
        let mut pending = self.list_dir(root, runtime).await?;

        while let Some(path) = pending.pop() {
            let metadata = runtime
                .metadata(&path)
                .await
                .map_err(|source| Error::Stat {
                    path: path.clone(),
                    source,
                })?;

            if metadata.is_dir {
                pending.extend(self.list_dir(&path, runtime).await?);
                continue;
            }

            match self.module_file(root, &path) {
                Some(file) => {
                    if !modules.insert(file) {
                        tracing::debug!(
                            "{} shares its module id with an earlier file; keeping the first",
                            path.display()
                        );
                    }
                }
                None => skipped += 1,
            }
        }

        tracing::debug!(
            "Discovered {} module files under {} ({} other files ignored)",
            modules.file_count(),
            root.display(),
            skipped
        );

        Ok(modules)
    }

    /// List a directory as a stack: the first entry in sorted order is popped first.
    async fn list_dir(&self, dir: &Path, runtime: &dyn Runtime) -> Result<Vec<PathBuf>> {
        let mut names = runtime
            .read_dir(dir)
            .await
            .map_err(|source| Error::ReadDir {
                path: dir.to_path_buf(),
                source,
            })?;
        names.retain(|name| !self.config.is_excluded_entry(name));
        names.sort();
        Ok(names.into_iter().rev().map(|name| dir.join(name)).collect())
    }

    fn module_file(&self, root: &Path, path: &Path) -> Option<ModuleFile> {
        let extension = path.extension()?.to_str()?;
        if !self.config.is_recognized_extension(extension) {
            return None;
        }
        let relative = path.strip_prefix(root).ok()?;
        let relative_path = normalize_separators(&relative.to_string_lossy());

        Some(ModuleFile {
            id: ModuleId::from_relative(&relative_path, self.config),
            relative_path,
            absolute_path: path.to_path_buf(),
            extension: extension.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::test_utils::MemoryRuntime;

    async fn discover(runtime: &MemoryRuntime) -> Result<ModuleMap> {
        let config = AnalyzerConfig::default();
        ModuleDiscoverer::new(&config)
            .discover(runtime.root(), runtime)
            .await
    }

    #[tokio::test]
    async fn test_discovers_recognized_extensions_only() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("index.js", "")
            .with_file("lib/util.ts", "")
            .with_file("lib/view.tsx", "")
            .with_file("README.md", "")
            .with_file("data.json", "{}");

        let modules = discover(&runtime).await.unwrap();
        let ids: Vec<_> = modules.ids().map(ModuleId::as_str).collect();
        assert_eq!(ids, vec!["index", "lib/util", "lib/view"]);
        assert_eq!(modules.file_count(), 3);
    }

    #[tokio::test]
    async fn test_prunes_hidden_and_node_modules() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("a.js", "")
            .with_file("node_modules/react/index.js", "")
            .with_file(".cache/b.js", "")
            .with_file("src/.hidden.js", "");

        let modules = discover(&runtime).await.unwrap();
        let ids: Vec<_> = modules.ids().map(ModuleId::as_str).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[tokio::test]
    async fn test_alias_lookup_with_and_without_extension() {
        let runtime = MemoryRuntime::new("/p").with_file("src/a.ts", "");
        let modules = discover(&runtime).await.unwrap();

        let by_ext = modules.lookup("src/a.ts").unwrap();
        let bare = modules.lookup("src/a").unwrap();
        assert_eq!(by_ext, bare);
        assert_eq!(bare.absolute_path, PathBuf::from("/p/src/a.ts"));
        assert_eq!(bare.extension, "ts");
        assert!(modules.lookup("src/a.js").is_none());
    }

    #[tokio::test]
    async fn test_first_writer_wins_on_collision() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("a.ts", "")
            .with_file("a.js", "");

        let modules = discover(&runtime).await.unwrap();
        assert_eq!(modules.len(), 1);
        assert_eq!(modules.file_count(), 2);
        // sorted listing: a.js comes before a.ts
        assert_eq!(modules.lookup("a").unwrap().relative_path, "a.js");
        assert_eq!(modules.shadowed()[0].relative_path, "a.ts");
        // the shadowed spelling still resolves to the canonical id
        assert_eq!(modules.canonical("a.ts").map(ModuleId::as_str), Some("a"));
    }

    #[tokio::test]
    async fn test_depth_first_order() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("b/z.js", "")
            .with_file("a.js", "")
            .with_file("c.js", "");

        let modules = discover(&runtime).await.unwrap();
        let ids: Vec<_> = modules.ids().map(ModuleId::as_str).collect();
        assert_eq!(ids, vec!["a", "b/z", "c"]);
    }

    #[tokio::test]
    async fn test_unreadable_directory_is_fatal() {
        let runtime = MemoryRuntime::new("/p")
            .with_file("a.js", "")
            .with_file("locked/b.js", "")
            .with_unreadable("locked");

        let err = discover(&runtime).await.unwrap_err();
        match err {
            Error::ReadDir { path, .. } => assert_eq!(path, PathBuf::from("/p/locked")),
            other => panic!("expected ReadDir, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_missing_root() {
        let runtime = MemoryRuntime::new("/p");
        let config = AnalyzerConfig::default();
        let err = ModuleDiscoverer::new(&config)
            .discover(Path::new("/elsewhere"), &runtime)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRoot { .. }));
    }
}
