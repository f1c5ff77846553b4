//! Analyzer configuration.

use serde::{Deserialize, Serialize};

/// Source-file suffixes recognized as modules (without the leading dot).
pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "ts", "jsx", "tsx", "mjs", "cjs"];

/// Directory names that are never descended into.
pub const DEFAULT_EXCLUDED_DIRS: &[&str] = &["node_modules"];

/// Default bound on enumerated chain length (in modules).
pub const DEFAULT_MAX_CHAIN_LENGTH: usize = 10;

/// Number of entries kept in each folder ranking.
pub const DEFAULT_TOP_N: usize = 10;

/// A module is "deep" when either directional depth exceeds this.
pub const DEEP_DEPTH_THRESHOLD: usize = 5;

/// Depth above which a deep module is reported as critical.
pub const CRITICAL_DEPTH_THRESHOLD: usize = 8;

/// Average outgoing depth above which an architecture recommendation fires.
pub const HIGH_AVERAGE_DEPTH: f64 = 4.0;

/// Share of deep modules above which a refactoring recommendation fires.
pub const DEEP_SHARE_THRESHOLD: f64 = 0.2;

/// Maximum outgoing depth above which a performance recommendation fires.
pub const VERY_HIGH_MAX_DEPTH: usize = 10;

/// Environment variable that turns on structural debug dumps.
pub const VERBOSE_ENV: &str = "DEPDASH_VERBOSE";

/// Legacy spelling of [`VERBOSE_ENV`], still honored.
pub const LEGACY_VERBOSE_ENV: &str = "VERBOSE";

/// Configuration shared by single-file and folder analysis.
///
/// Keys are snake_case in every source (JSON file, `DEPDASH_*` variables).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Recognized source extensions, without the leading dot.
    pub extensions: Vec<String>,

    /// Directory names pruned during discovery.
    pub excluded_dirs: Vec<String>,

    /// Prune every entry whose name starts with `.`.
    pub skip_hidden: bool,

    /// Maximum number of modules in an enumerated chain.
    pub max_chain_length: usize,

    /// Size of the top-N rankings in folder reports.
    pub top_n: usize,

    /// Emit module-map and matrix dumps through the diagnostic sink.
    pub verbose: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            excluded_dirs: DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect(),
            skip_hidden: true,
            max_chain_length: DEFAULT_MAX_CHAIN_LENGTH,
            top_n: DEFAULT_TOP_N,
            verbose: false,
        }
    }
}

impl AnalyzerConfig {
    /// Default configuration with `verbose` taken from the environment.
    pub fn from_env() -> Self {
        let verbose = [VERBOSE_ENV, LEGACY_VERBOSE_ENV]
            .iter()
            .any(|key| flag_enabled(std::env::var(key).ok().as_deref()));

        Self {
            verbose,
            ..Self::default()
        }
    }

    /// Whether `ext` (without the dot) is a recognized source extension.
    pub fn is_recognized_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }

    /// Strip a trailing recognized extension, if any.
    ///
    /// Only the last suffix is considered, so `a.test.ts` becomes `a.test`
    /// while `a.json` is returned unchanged.
    pub fn strip_extension<'a>(&self, path: &'a str) -> &'a str {
        match path.rsplit_once('.') {
            Some((stem, ext)) if !ext.contains('/') && self.is_recognized_extension(ext) => stem,
            _ => path,
        }
    }

    /// Whether a directory entry with this name is pruned from discovery.
    pub fn is_excluded_entry(&self, name: &str) -> bool {
        (self.skip_hidden && name.starts_with('.')) || self.excluded_dirs.iter().any(|d| d == name)
    }
}

fn flag_enabled(value: Option<&str>) -> bool {
    match value {
        Some(v) => {
            let v = v.trim();
            !v.is_empty() && v != "0" && !v.eq_ignore_ascii_case("false")
        }
        None => false,
    }
}
