//! Recoverable problems and structural dumps.
//!
//! Analysis never aborts on a single bad file. Per-file problems are handed
//! to a [`DiagnosticSink`] and the offending file or edge is skipped.

use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

use crate::module_id::ModuleId;

/// A recoverable, per-file problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("Could not read {}: {reason}", path.display())]
    UnreadableFile { path: PathBuf, reason: String },

    #[error("Could not resolve '{specifier}' imported from {from}: {reason}")]
    UnresolvableImport {
        specifier: String,
        from: ModuleId,
        reason: String,
    },
}

/// Receiver for warnings and verbose dumps.
pub trait DiagnosticSink: Send + Sync + std::fmt::Debug {
    fn report(&self, diagnostic: Diagnostic);

    /// Structural dump (module map, dependency matrix), emitted only in verbose mode.
    fn dump(&self, label: &str, body: &str) {
        tracing::debug!("{}:\n{}", label, body);
    }
}

/// Default sink: warnings go to `tracing`.
#[derive(Debug, Default)]
pub struct TracingSink {
    warnings: AtomicUsize,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of diagnostics reported so far.
    pub fn warning_count(&self) -> usize {
        self.warnings.load(Ordering::Relaxed)
    }
}

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.warnings.fetch_add(1, Ordering::Relaxed);
        tracing::warn!("{}", diagnostic);
    }

    fn dump(&self, label: &str, body: &str) {
        tracing::info!("{}:\n{}", label, body);
    }
}

/// Sink that keeps everything in memory. Used by tests and embedders that
/// want to render diagnostics themselves.
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    dumps: Mutex<Vec<(String, String)>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.lock().clone()
    }

    /// `(label, body)` pairs in emission order.
    pub fn dumps(&self) -> Vec<(String, String)> {
        self.dumps.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.lock().is_empty()
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&self, diagnostic: Diagnostic) {
        self.diagnostics.lock().push(diagnostic);
    }

    fn dump(&self, label: &str, body: &str) {
        self.dumps.lock().push((label.to_string(), body.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_messages() {
        let unreadable = Diagnostic::UnreadableFile {
            path: PathBuf::from("/p/a.js"),
            reason: "Permission denied".to_string(),
        };
        assert_eq!(unreadable.to_string(), "Could not read /p/a.js: Permission denied");

        let unresolvable = Diagnostic::UnresolvableImport {
            specifier: "./x".to_string(),
            from: ModuleId::new("src/a"),
            reason: "bad".to_string(),
        };
        assert!(unresolvable.to_string().contains("'./x' imported from src/a"));
    }

    #[test]
    fn test_tracing_sink_counts() {
        let sink = TracingSink::new();
        sink.report(Diagnostic::UnreadableFile {
            path: PathBuf::from("a.js"),
            reason: "gone".to_string(),
        });
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn test_collecting_sink() {
        let sink = CollectingSink::new();
        assert!(sink.is_empty());
        sink.dump("Module map", "a -> a.js");
        sink.report(Diagnostic::UnreadableFile {
            path: PathBuf::from("a.js"),
            reason: "gone".to_string(),
        });
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.dumps()[0].0, "Module map");
    }
}
