//! Module identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::config::AnalyzerConfig;

/// Root-relative, `/`-separated, extension-stripped module identifier.
///
/// `src/a.js` and `src/a.ts` share the identifier `src/a`; an import of
/// `./a` matches either one regardless of how the specifier is written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModuleId(String);

impl ModuleId {
    /// Wrap an already-normalized identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build an identifier from a root-relative path spelling.
    ///
    /// Backslashes become `/`, a leading `./` is dropped, and a recognized
    /// extension is stripped.
    pub fn from_relative(path: &str, config: &AnalyzerConfig) -> Self {
        let normalized = normalize_separators(path);
        let trimmed = normalized.strip_prefix("./").unwrap_or(&normalized);
        Self(config.strip_extension(trimmed).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, e.g. `utils` for `src/lib/utils`.
    pub fn file_stem(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

/// Replace platform separators with `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

impl fmt::Display for ModuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ModuleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ModuleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModuleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModuleId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
