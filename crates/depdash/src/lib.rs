//! # depdash
//!
//! Module dependency analysis for JavaScript/TypeScript source trees.
//!
//! `depdash` discovers source modules under a scan root, extracts their
//! relative imports with a lightweight pattern matcher, and turns them into a
//! dependency graph. On top of the graph it reports circular dependencies,
//! dependency depth and chains, and per-file fan-in/fan-out metrics.
//!
//! ## Pipeline
//!
//! ```text
//! ModuleDiscoverer ──► extract_imports ──► GraphBuilder ──┬─► CircularDependencyDetector ─┐
//!   (Runtime)        (SpecifierExtractor   (DependencyGraph) └─► DepthAnalyzer ──────────────┴─► FolderReport /
//!                     + PathResolver)                                                          SingleFileReport
//! ```
//!
//! It is not a parser: only `import ... from '...'` and `require('...')` with
//! string-literal specifiers are recognized, and bare package specifiers are
//! never resolved.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! # async fn example() -> depdash::Result<()> {
//! let folder = depdash::analyze_folder("./src").await?;
//! for cycle in &folder.circular_dependencies.circular_dependencies {
//!     println!("{}", cycle.description);
//! }
//!
//! let single = depdash::analyze_single_file("utils/format.ts", "./src").await?;
//! println!("{} files import the target", single.incoming.len());
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod analyzer;
pub mod config;
pub mod diagnostics;
pub mod discovery;
pub mod extract;
pub mod graph;
pub mod module_id;
pub mod report;
pub mod resolver;
pub mod runtime;

pub use analysis::{
    CircularDependency, CircularDependencyDetector, CircularReport, DependencyChain, DepthAnalyzer,
    DepthRecord, DepthReport, DepthStatistics, Severity,
};
pub use analyzer::{Analyzer, Configured, Unconfigured, analyze_folder, analyze_single_file};
pub use config::AnalyzerConfig;
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use discovery::{ModuleDiscoverer, ModuleFile, ModuleMap};
pub use extract::{RegexExtractor, SpecifierExtractor};
pub use graph::{DependencyGraph, Direction};
pub use module_id::ModuleId;
pub use report::{FileMetrics, FolderReport, SingleFileReport};
pub use resolver::{PathResolver, Resolution, ResolveError};
pub use runtime::{FileMetadata, NativeRuntime, Runtime, RuntimeError, RuntimeResult};

use std::path::PathBuf;

/// Error types for depdash operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The scan root is missing or not a directory.
    #[error("Invalid scan root {}: {reason}", path.display())]
    InvalidRoot { path: PathBuf, reason: String },

    /// A directory could not be listed during discovery.
    #[error("Could not read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// A directory entry could not be inspected during discovery.
    #[error("Could not stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: RuntimeError,
    },

    /// Filesystem error outside discovery.
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Result type alias for depdash operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests;
