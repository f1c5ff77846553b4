//! Shared test utilities for analysis tests.

#![allow(clippy::disallowed_methods)]

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::diagnostics::CollectingSink;
use crate::runtime::test_utils::MemoryRuntime;
use crate::{Analyzer, Configured};

/// Create a test project on disk with the given files.
///
/// # Arguments
/// * `temp` - Temporary directory
/// * `files` - Array of (path, content) tuples
///
/// # Returns
/// The root path of the created project
pub fn create_test_project(temp: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = temp.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create parent directory for {}: {}", path, e));
        }
        fs::write(&file_path, content).unwrap_or_else(|e| panic!("Failed to write file {}: {}", path, e));
    }

    root
}

/// In-memory project rooted at `/project`.
pub fn memory_project(files: &[(&str, &str)]) -> MemoryRuntime {
    files
        .iter()
        .fold(MemoryRuntime::new("/project"), |runtime, (path, content)| {
            runtime.with_file(path, *content)
        })
}

/// Analyzer over an in-memory project, with diagnostics collected for inspection.
pub fn memory_analyzer(runtime: MemoryRuntime) -> (Analyzer<Configured>, Arc<CollectingSink>) {
    let sink = Arc::new(CollectingSink::new());
    let analyzer = Analyzer::new()
        .runtime(Arc::new(runtime))
        .diagnostics(sink.clone())
        .root("/project");
    (analyzer, sink)
}

/// A linear import chain `module0 -> module1 -> ... -> module{depth-1}`.
pub fn deep_chain_files(depth: usize) -> Vec<(String, String)> {
    (0..depth)
        .map(|i| {
            let content = if i + 1 < depth {
                format!("import {{ fn{} }} from './module{}';", i + 1, i + 1)
            } else {
                String::new()
            };
            (format!("src/module{}.ts", i), content)
        })
        .collect()
}

/// Borrow owned `(path, content)` pairs for the helpers above.
pub fn as_refs(files: &[(String, String)]) -> Vec<(&str, &str)> {
    files
        .iter()
        .map(|(path, content)| (path.as_str(), content.as_str()))
        .collect()
}
