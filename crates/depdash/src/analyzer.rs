//! Analysis entry points.
//!
//! [`Analyzer`] wires discovery, extraction, graph construction and the two
//! graph analyses together. It uses the typestate pattern: a scan root must
//! be set before either analysis can run.

use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Arc;

use crate::Result;
use crate::analysis::{CircularDependencyDetector, DepthAnalyzer};
use crate::config::AnalyzerConfig;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::discovery::{ModuleDiscoverer, ModuleMap};
use crate::extract::{RegexExtractor, SpecifierExtractor};
use crate::graph::{DependencyGraph, Direction, GraphBuilder, TargetMatcher};
use crate::report::{FolderReport, SingleFileReport, TargetChains};
use crate::runtime::{NativeRuntime, Runtime};

/// Typestate marker for an analyzer without a scan root.
#[derive(Debug, Clone, Copy)]
pub struct Unconfigured;

/// Typestate marker for an analyzer with a scan root.
#[derive(Debug, Clone, Copy)]
pub struct Configured;

/// Dependency analyzer for one scan root.
///
/// # Example
///
/// ```rust,no_run
/// use depdash::Analyzer;
///
/// # async fn example() -> depdash::Result<()> {
/// let report = Analyzer::new()
///     .root("./src") // Transitions to Configured
///     .analyze_folder()
///     .await?;
///
/// println!("{} circular dependencies", report.circular_dependencies.total_circular_dependencies);
/// # Ok(())
/// # }
/// ```
pub struct Analyzer<State = Unconfigured> {
    root: PathBuf,
    config: AnalyzerConfig,
    runtime: Option<Arc<dyn Runtime>>,
    diagnostics: Arc<dyn DiagnosticSink>,
    extractor: Arc<dyn SpecifierExtractor>,
    _state: PhantomData<State>,
}

impl Analyzer<Unconfigured> {
    /// Create an analyzer with default configuration, the native filesystem,
    /// the pattern-based extractor, and tracing diagnostics.
    pub fn new() -> Self {
        Self {
            root: PathBuf::new(),
            config: AnalyzerConfig::default(),
            runtime: None,
            diagnostics: Arc::new(TracingSink::new()),
            extractor: Arc::new(RegexExtractor::new()),
            _state: PhantomData,
        }
    }

    /// Set the scan root. Transitions to `Configured`.
    pub fn root(self, root: impl Into<PathBuf>) -> Analyzer<Configured> {
        Analyzer {
            root: root.into(),
            config: self.config,
            runtime: self.runtime,
            diagnostics: self.diagnostics,
            extractor: self.extractor,
            _state: PhantomData,
        }
    }
}

impl Default for Analyzer<Unconfigured> {
    fn default() -> Self {
        Self::new()
    }
}

impl<State> Analyzer<State> {
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the runtime for filesystem operations (default: [`NativeRuntime`]).
    pub fn runtime(mut self, runtime: Arc<dyn Runtime>) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Set the receiver for warnings and verbose dumps.
    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Replace the import extractor.
    pub fn extractor(mut self, extractor: Arc<dyn SpecifierExtractor>) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn settings(&self) -> &AnalyzerConfig {
        &self.config
    }
}

impl Analyzer<Configured> {
    pub fn scan_root(&self) -> &std::path::Path {
        &self.root
    }

    /// Analyze every module under the scan root.
    pub async fn analyze_folder(&self) -> Result<FolderReport> {
        let runtime = self.get_runtime();
        let modules = self.discover(runtime.as_ref()).await?;
        let builder = self.builder(&modules, runtime.as_ref());

        let graph = builder.build_folder().await;
        self.dump_graph(&graph);

        let circular = CircularDependencyDetector::new(&graph).report();
        let depth = DepthAnalyzer::new(&graph).report();

        tracing::info!(
            "Analyzed {} modules: {} edges, {} circular dependencies",
            graph.len(),
            graph.edge_count(),
            circular.total_circular_dependencies
        );

        Ok(FolderReport::new(&graph, circular, depth, self.config.top_n))
    }

    /// Analyze the direct neighborhood of one target module.
    ///
    /// `target` is root-relative and may be written with or without its
    /// extension, or as a bare trailing path such as `utils.ts`. A target
    /// that matches no discovered module yields an empty report.
    pub async fn analyze_file(&self, target: &str) -> Result<SingleFileReport> {
        let runtime = self.get_runtime();
        let modules = self.discover(runtime.as_ref()).await?;
        let builder = self.builder(&modules, runtime.as_ref());

        let matcher = TargetMatcher::new(target, &self.config);
        let edges = builder.target_edges(&matcher).await;

        let Some(target_id) = edges.target.clone() else {
            tracing::info!("Target {} not found among {} modules", target, modules.len());
            return Ok(SingleFileReport::empty(target, modules.file_count()));
        };

        tracing::info!(
            "{}: {} incoming, {} outgoing",
            target_id,
            edges.incoming.len(),
            edges.outgoing.len()
        );

        let seeds = std::iter::once(target_id.as_str())
            .chain(edges.incoming.keys().map(|id| id.as_str()))
            .chain(edges.outgoing.keys().map(|id| id.as_str()));
        let graph = builder.build_neighborhood(seeds).await;
        self.dump_graph(&graph);

        let circular = CircularDependencyDetector::new(&graph).report();
        let mut depth_analyzer = DepthAnalyzer::new(&graph);
        let max_length = self.config.max_chain_length;
        let dependency_chains = TargetChains {
            outgoing: depth_analyzer.find_chains(&target_id, Direction::Outgoing, max_length),
            incoming: depth_analyzer.find_chains(&target_id, Direction::Incoming, max_length),
        };
        let depth_analysis = depth_analyzer.report();

        Ok(SingleFileReport {
            target_file: target.to_string(),
            incoming: edges.incoming,
            outgoing: edges.outgoing,
            total_files: modules.file_count(),
            circular_dependencies: circular,
            depth_analysis,
            dependency_chains,
        })
    }

    fn get_runtime(&self) -> Arc<dyn Runtime> {
        match &self.runtime {
            Some(runtime) => Arc::clone(runtime),
            None => Arc::new(NativeRuntime::new()),
        }
    }

    async fn discover(&self, runtime: &dyn Runtime) -> Result<ModuleMap> {
        let modules = ModuleDiscoverer::new(&self.config)
            .discover(&self.root, runtime)
            .await?;
        tracing::info!("Found {} files to analyze", modules.file_count());

        if self.config.verbose {
            let keys: Vec<&str> = modules.alias_keys().collect();
            self.diagnostics.dump("Module files keys", &keys.join("\n"));
        }
        Ok(modules)
    }

    fn builder<'a>(&'a self, modules: &'a ModuleMap, runtime: &'a dyn Runtime) -> GraphBuilder<'a> {
        GraphBuilder::new(
            modules,
            runtime,
            self.extractor.as_ref(),
            self.diagnostics.as_ref(),
            &self.config,
        )
    }

    fn dump_graph(&self, graph: &DependencyGraph) {
        if self.config.verbose {
            self.diagnostics
                .dump("Dependency matrix", &graph.matrix_dump());
        }
    }
}

/// Analyze every module under `root`, with configuration from the environment.
pub async fn analyze_folder(root: impl Into<PathBuf>) -> Result<FolderReport> {
    Analyzer::new()
        .config(AnalyzerConfig::from_env())
        .root(root)
        .analyze_folder()
        .await
}

/// Analyze one target module under `root`, with configuration from the environment.
pub async fn analyze_single_file(target: &str, root: impl Into<PathBuf>) -> Result<SingleFileReport> {
    Analyzer::new()
        .config(AnalyzerConfig::from_env())
        .root(root)
        .analyze_file(target)
        .await
}
