//! Import extraction.
//!
//! Extraction is split in two steps:
//!
//! 1. A [`SpecifierExtractor`] scans raw source text and returns every import
//!    occurrence it recognizes, in source order, as a [`RawImport`]. The
//!    shipped implementation is [`RegexExtractor`]; a tokenizer-backed one can
//!    replace it without touching any graph code.
//! 2. [`extract_imports`] resolves each relative specifier against the
//!    importing file and renders the human-readable detail string.
//!    External specifiers are dropped, resolution failures are reported to the
//!    diagnostic sink and skipped.

mod detail;
mod pattern;

pub use self::pattern::RegexExtractor;

use serde::Serialize;

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::discovery::ModuleFile;
use crate::module_id::ModuleId;
use crate::resolver::{PathResolver, Resolution};

/// Marker used when an import names no specific items.
pub const NO_SPECIFIC_ITEMS: &str = "Module import (no specific items)";

/// Surface syntax an occurrence was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ImportKind {
    /// `import ... from '...'`
    From,
    /// `require('...')`
    Require,
}

/// What an import clause binds, captured verbatim from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportShape {
    /// `import def, { a, b as c } from '...'`
    DefaultAndNamed { default: String, named: String },
    /// `import { a, b as c } from '...'` (braces included)
    Named(String),
    /// `import def from '...'`
    Default(String),
    /// `import * as ns from '...'`
    Namespace(String),
    /// `import a, b from '...'`
    Multiple(String),
    /// Nothing captured (e.g. `require('...')`).
    Bare,
}

impl ImportShape {
    /// One-line description shown next to an edge.
    pub fn describe(&self) -> String {
        detail::describe(self)
    }
}

/// One recognized import occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    /// Module specifier exactly as written between the quotes.
    pub specifier: String,
    pub shape: ImportShape,
    pub kind: ImportKind,
    /// Byte offset of the occurrence in the source.
    pub offset: usize,
}

/// Capability that finds import occurrences in raw source text.
///
/// Implementations must return occurrences in source order and must not
/// resolve or filter specifiers.
pub trait SpecifierExtractor: Send + Sync + std::fmt::Debug {
    fn extract(&self, source: &str) -> Vec<RawImport>;
}

/// A relative import resolved to a project module id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedImport {
    pub specifier: String,
    pub target: ModuleId,
    pub detail: String,
}

/// Extract and resolve the relative imports of one file.
pub fn extract_imports(
    source: &str,
    file: &ModuleFile,
    extractor: &dyn SpecifierExtractor,
    resolver: &PathResolver<'_>,
    sink: &dyn DiagnosticSink,
) -> Vec<ResolvedImport> {
    let mut resolved = Vec::new();

    for raw in extractor.extract(source) {
        match resolver.resolve(&raw.specifier, &file.relative_path) {
            Ok(Resolution::Local(target)) => {
                tracing::trace!("{}: '{}' -> {}", file.id, raw.specifier, target);
                resolved.push(ResolvedImport {
                    detail: raw.shape.describe(),
                    specifier: raw.specifier,
                    target,
                });
            }
            Ok(Resolution::External(name)) => {
                tracing::trace!("{}: skipping external package '{}'", file.id, name);
            }
            Err(e) => sink.report(Diagnostic::UnresolvableImport {
                specifier: raw.specifier,
                from: file.id.clone(),
                reason: e.to_string(),
            }),
        }
    }

    resolved
}
