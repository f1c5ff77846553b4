//! Report types handed to renderers.
//!
//! Field names serialize in camelCase and every map keeps insertion order, so
//! the JSON form of a report is stable for an unchanged tree.

use serde::Serialize;
use std::cmp::Ordering;

use crate::analysis::{CircularReport, DependencyChain, DepthReport};
use crate::graph::{DependencyGraph, DetailMap};
use crate::module_id::ModuleId;

/// Import details of one module, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportDetails {
    /// Importer -> details of its imports of this module.
    pub incoming: DetailMap,
    /// Dependency -> details of this module's imports of it.
    pub outgoing: DetailMap,
}

/// Fan-in/fan-out metrics of one module.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetrics {
    pub file: ModuleId,
    pub incoming_count: usize,
    pub outgoing_count: usize,
    pub total_dependencies: usize,
    /// `outgoing / incoming`, or `outgoing` alone when nothing imports the file.
    pub dependency_ratio: f64,
    pub incoming: Vec<ModuleId>,
    pub outgoing: Vec<ModuleId>,
    pub import_details: ImportDetails,
}

impl FileMetrics {
    pub fn from_graph(graph: &DependencyGraph, file: &ModuleId) -> Self {
        let incoming: Vec<ModuleId> = graph.dependents(file).cloned().collect();
        let outgoing: Vec<ModuleId> = graph.dependencies(file).cloned().collect();

        let mut import_details = ImportDetails::default();
        for importer in &incoming {
            import_details
                .incoming
                .insert(importer.clone(), graph.import_details(importer, file).to_vec());
        }
        for dependency in &outgoing {
            import_details
                .outgoing
                .insert(dependency.clone(), graph.import_details(file, dependency).to_vec());
        }

        Self {
            file: file.clone(),
            incoming_count: incoming.len(),
            outgoing_count: outgoing.len(),
            total_dependencies: incoming.len() + outgoing.len(),
            dependency_ratio: dependency_ratio(outgoing.len(), incoming.len()),
            incoming,
            outgoing,
            import_details,
        }
    }
}

fn dependency_ratio(outgoing: usize, incoming: usize) -> f64 {
    if incoming > 0 {
        outgoing as f64 / incoming as f64
    } else {
        outgoing as f64
    }
}

/// Top-N rankings, each sorted descending with ties kept in graph order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rankings {
    pub most_depended_on: Vec<FileMetrics>,
    pub most_dependent: Vec<FileMetrics>,
    pub highest_ratio: Vec<FileMetrics>,
}

impl Rankings {
    pub fn from_files(files: &[FileMetrics], top_n: usize) -> Self {
        Self {
            most_depended_on: top(files, top_n, |a, b| b.incoming_count.cmp(&a.incoming_count)),
            most_dependent: top(files, top_n, |a, b| b.outgoing_count.cmp(&a.outgoing_count)),
            highest_ratio: top(files, top_n, |a, b| {
                b.dependency_ratio.total_cmp(&a.dependency_ratio)
            }),
        }
    }
}

fn top<F>(files: &[FileMetrics], n: usize, compare: F) -> Vec<FileMetrics>
where
    F: FnMut(&FileMetrics, &FileMetrics) -> Ordering,
{
    let mut sorted = files.to_vec();
    sorted.sort_by(compare);
    sorted.truncate(n);
    sorted
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of every file's `total_dependencies`; each edge counts at both ends.
    pub total_dependencies: usize,
    pub average_incoming: f64,
    pub average_outgoing: f64,
}

impl Summary {
    pub fn from_files(files: &[FileMetrics]) -> Self {
        if files.is_empty() {
            return Self::default();
        }
        let n = files.len() as f64;
        Self {
            total_dependencies: files.iter().map(|f| f.total_dependencies).sum(),
            average_incoming: files.iter().map(|f| f.incoming_count).sum::<usize>() as f64 / n,
            average_outgoing: files.iter().map(|f| f.outgoing_count).sum::<usize>() as f64 / n,
        }
    }
}

/// Whole-tree report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderReport {
    pub total_files: usize,
    pub files: Vec<FileMetrics>,
    pub metrics: Rankings,
    pub summary: Summary,
    pub circular_dependencies: CircularReport,
    pub depth_analysis: DepthReport,
}

impl FolderReport {
    pub fn new(
        graph: &DependencyGraph,
        circular_dependencies: CircularReport,
        depth_analysis: DepthReport,
        top_n: usize,
    ) -> Self {
        let files: Vec<FileMetrics> = graph
            .modules()
            .map(|id| FileMetrics::from_graph(graph, id))
            .collect();

        Self {
            total_files: files.len(),
            metrics: Rankings::from_files(&files, top_n),
            summary: Summary::from_files(&files),
            files,
            circular_dependencies,
            depth_analysis,
        }
    }

    pub fn file(&self, id: &str) -> Option<&FileMetrics> {
        self.files.iter().find(|f| f.file.as_str() == id)
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Longest walks from the analysis target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TargetChains {
    pub outgoing: Vec<DependencyChain>,
    pub incoming: Vec<DependencyChain>,
}

/// Report centered on one target file.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleFileReport {
    /// Target as requested by the caller.
    pub target_file: String,
    /// Importer -> details of each import of the target.
    pub incoming: DetailMap,
    /// Dependency -> details of each import in the target.
    pub outgoing: DetailMap,
    /// Number of recognized source files under the scan root.
    pub total_files: usize,
    pub circular_dependencies: CircularReport,
    pub depth_analysis: DepthReport,
    pub dependency_chains: TargetChains,
}

impl SingleFileReport {
    /// Report for a target that matched no discovered module.
    pub fn empty(target_file: impl Into<String>, total_files: usize) -> Self {
        Self {
            target_file: target_file.into(),
            incoming: DetailMap::default(),
            outgoing: DetailMap::default(),
            total_files,
            circular_dependencies: CircularReport::default(),
            depth_analysis: DepthReport::default(),
            dependency_chains: TargetChains::default(),
        }
    }

    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
