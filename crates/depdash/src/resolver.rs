//! Import path resolution.
//!
//! Turns a relative specifier plus the importing file's location into a
//! root-relative [`ModuleId`]. Resolution is purely lexical: the target file
//! does not have to exist, and no package-manager lookup happens. Anything
//! that does not start with `.` is external.

use path_clean::PathClean;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

use crate::config::AnalyzerConfig;
use crate::module_id::{ModuleId, normalize_separators};

/// Result of resolving one specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Specifier resolved to a project module id.
    Local(ModuleId),

    /// Bare package specifier (`react`, `lodash/fp`); never part of the graph.
    External(String),
}

impl Resolution {
    pub fn is_local(&self) -> bool {
        matches!(self, Resolution::Local(_))
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Resolution::External(_))
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Local(id) => write!(f, "Local({})", id),
            Resolution::External(name) => write!(f, "External({})", name),
        }
    }
}

/// Per-occurrence resolution failure. Recoverable: the edge is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("specifier '{0}' contains a NUL byte")]
    InvalidSpecifier(String),

    #[error("'{path}' cannot be expressed relative to '{root}'")]
    OutsideRoot { path: PathBuf, root: PathBuf },
}

/// Lexical resolver bound to one scan root.
#[derive(Debug, Clone)]
pub struct PathResolver<'a> {
    root: &'a Path,
    config: &'a AnalyzerConfig,
}

impl<'a> PathResolver<'a> {
    pub fn new(root: &'a Path, config: &'a AnalyzerConfig) -> Self {
        Self { root, config }
    }

    /// Whether a specifier is relative (`./x`, `../x`, `.`).
    pub fn is_relative(specifier: &str) -> bool {
        specifier.starts_with('.')
    }

    /// Resolve `specifier` as written in the file at `from` (root-relative).
    pub fn resolve(&self, specifier: &str, from: &str) -> Result<Resolution, ResolveError> {
        if !Self::is_relative(specifier) {
            return Ok(Resolution::External(specifier.to_string()));
        }
        if specifier.contains('\0') {
            return Err(ResolveError::InvalidSpecifier(specifier.to_string()));
        }

        let current = self.root.join(from);
        let current_dir = current.parent().unwrap_or(self.root);
        let resolved = current_dir.join(specifier).clean();
        let root = self.root.clean();

        let relative = relative_to(&resolved, &root).ok_or_else(|| ResolveError::OutsideRoot {
            path: resolved.clone(),
            root: root.clone(),
        })?;
        let relative = normalize_separators(&relative.to_string_lossy());

        Ok(Resolution::Local(ModuleId::new(
            self.config.strip_extension(&relative),
        )))
    }
}

/// Express `path` relative to `base`, climbing with `..` when needed.
///
/// Both paths must be clean. Returns `None` when `base` contains `..`
/// components that `path` does not share, since the walk back down would be
/// unknown.
fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let base_parts: Vec<Component<'_>> = base.components().collect();

    let common = path_parts
        .iter()
        .zip(base_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut result = PathBuf::new();
    for part in &base_parts[common..] {
        match part {
            Component::Normal(_) => result.push(".."),
            Component::CurDir => {}
            _ => return None,
        }
    }
    for part in &path_parts[common..] {
        result.push(part.as_os_str());
    }
    Some(result)
}
