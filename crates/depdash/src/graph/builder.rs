//! Graph construction from discovered modules.
//!
//! Files are read one at a time in discovery order, so the insertion order of
//! nodes, edges and import details is fully determined by the listing order.

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use super::DependencyGraph;
use crate::config::AnalyzerConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::discovery::{ModuleFile, ModuleMap};
use crate::extract::{ResolvedImport, SpecifierExtractor, extract_imports};
use crate::module_id::{ModuleId, normalize_separators};
use crate::resolver::PathResolver;
use crate::runtime::Runtime;

/// Neighbor id to import details, in scan order.
pub type DetailMap = IndexMap<ModuleId, Vec<String>, FxBuildHasher>;

/// Direct neighbors of an analysis target.
#[derive(Debug, Clone, Default)]
pub struct TargetEdges {
    /// The discovered file matching the target, if any.
    pub target: Option<ModuleId>,
    /// Importer -> details of each import of the target.
    pub incoming: DetailMap,
    /// Resolved dependency -> details, read from the target's own content.
    pub outgoing: DetailMap,
}

/// Extension-tolerant matcher for a user-supplied target spelling.
///
/// `src/a.ts`, `src/a` and a bare `a.ts` (matched as a path suffix) all
/// select the module `src/a`.
#[derive(Debug, Clone)]
pub struct TargetMatcher {
    spelling: String,
    bare: String,
}

impl TargetMatcher {
    pub fn new(target: &str, config: &AnalyzerConfig) -> Self {
        let normalized = normalize_separators(target);
        let spelling = normalized
            .strip_prefix("./")
            .unwrap_or(&normalized)
            .to_string();
        let bare = config.strip_extension(&spelling).to_string();
        Self { spelling, bare }
    }

    pub fn matches(&self, candidate: &str) -> bool {
        if self.spelling.is_empty() {
            return false;
        }
        let candidate = normalize_separators(candidate);
        candidate == self.spelling
            || candidate == self.bare
            || candidate.ends_with(&format!("/{}", self.spelling))
            || candidate.ends_with(&format!("/{}", self.bare))
    }

    fn matches_file(&self, file: &ModuleFile) -> bool {
        self.matches(&file.relative_path) || self.matches(file.id.as_str())
    }

    pub fn as_str(&self) -> &str {
        &self.spelling
    }
}

/// Reads module sources and turns their imports into graph edges.
pub struct GraphBuilder<'a> {
    modules: &'a ModuleMap,
    runtime: &'a dyn Runtime,
    extractor: &'a dyn SpecifierExtractor,
    sink: &'a dyn DiagnosticSink,
    config: &'a AnalyzerConfig,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(
        modules: &'a ModuleMap,
        runtime: &'a dyn Runtime,
        extractor: &'a dyn SpecifierExtractor,
        sink: &'a dyn DiagnosticSink,
        config: &'a AnalyzerConfig,
    ) -> Self {
        Self {
            modules,
            runtime,
            extractor,
            sink,
            config,
        }
    }

    /// Build the complete graph: every discovered module is a node, and
    /// every import resolving to a discovered module is an edge.
    pub async fn build_folder(&self) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for id in self.modules.ids() {
            graph.add_module(id.clone());
        }

        for file in self.modules.iter() {
            let Some(imports) = self.imports_of(file).await else {
                continue;
            };
            tracing::debug!("{}: {} relative imports", file.id, imports.len());

            for import in imports {
                if self.modules.contains(&import.target) {
                    graph.add_dependency(&file.id, &import.target, Some(import.detail));
                }
            }
        }

        graph
    }

    /// Build the graph restricted to `seeds` and the modules they import.
    ///
    /// Seeds are given in any accepted spelling and mapped through the alias
    /// table; spellings that do not name a discovered module are ignored.
    pub async fn build_neighborhood<I, S>(&self, seeds: I) -> DependencyGraph
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut graph = DependencyGraph::new();
        let mut files = Vec::new();
        for seed in seeds {
            let Some(file) = self.modules.lookup(seed.as_ref()) else {
                continue;
            };
            if graph.add_module(file.id.clone()) {
                files.push(file);
            }
        }

        for file in files {
            let Some(imports) = self.imports_of(file).await else {
                continue;
            };
            for import in imports {
                if self.modules.contains(&import.target) {
                    graph.add_module(import.target.clone());
                    graph.add_dependency(&file.id, &import.target, None);
                }
            }
        }

        graph
    }

    /// Collect the direct importers and dependencies of the target.
    pub async fn target_edges(&self, matcher: &TargetMatcher) -> TargetEdges {
        let mut edges = TargetEdges::default();

        for file in self.modules.iter() {
            let is_target = matcher.matches_file(file);
            if is_target {
                tracing::debug!("{} is the analysis target", file.id);
                edges.target.get_or_insert_with(|| file.id.clone());
            }

            // An unreadable target keeps its importers, only its own edges are lost.
            let Some(imports) = self.imports_of(file).await else {
                continue;
            };

            if is_target {
                for import in imports {
                    if import.target == file.id {
                        continue;
                    }
                    edges
                        .outgoing
                        .entry(import.target)
                        .or_default()
                        .push(import.detail);
                }
            } else {
                for import in imports {
                    if matcher.matches(import.target.as_str()) {
                        edges
                            .incoming
                            .entry(file.id.clone())
                            .or_default()
                            .push(import.detail);
                    }
                }
            }
        }

        edges
    }

    /// Read a module's source. Failures are reported and yield `None`.
    pub async fn read_source(&self, file: &ModuleFile) -> Option<String> {
        match self.runtime.read_to_string(&file.absolute_path).await {
            Ok(source) => Some(source),
            Err(e) => {
                self.sink.report(Diagnostic::UnreadableFile {
                    path: file.absolute_path.clone(),
                    reason: e.to_string(),
                });
                None
            }
        }
    }

    async fn imports_of(&self, file: &ModuleFile) -> Option<Vec<ResolvedImport>> {
        let source = self.read_source(file).await?;
        let resolver = PathResolver::new(self.modules.root(), self.config);
        Some(extract_imports(
            &source,
            file,
            self.extractor,
            &resolver,
            self.sink,
        ))
    }
}
