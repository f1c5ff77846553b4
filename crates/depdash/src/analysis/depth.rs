//! Dependency depth analysis.
//!
//! The depth of a module in one direction is the length of the longest walk
//! that starts at it and follows edges in that direction without revisiting a
//! module already on the walk. Results are memoized per `(module, direction)`.
//!
//! Hitting a module that is already on the current walk counts as depth 0 for
//! that branch and is not memoized. A module whose walk went through such a
//! cut is memoized with the cut value, so on cyclic graphs the result for a
//! module can depend on which module was evaluated first. Evaluation order is
//! graph insertion order, which keeps the output deterministic.

use fixedbitset::FixedBitSet;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::collections::BTreeMap;

use super::{DependencyChain, Severity};
use crate::config::{
    CRITICAL_DEPTH_THRESHOLD, DEEP_DEPTH_THRESHOLD, DEEP_SHARE_THRESHOLD, HIGH_AVERAGE_DEPTH,
    VERY_HIGH_MAX_DEPTH,
};
use crate::graph::{DenseGraph, DependencyGraph, Direction};
use crate::module_id::ModuleId;

/// Directional depths of one module.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthRecord {
    pub outgoing_depth: usize,
    pub incoming_depth: usize,
    pub max_depth: usize,
}

impl DepthRecord {
    pub fn new(outgoing_depth: usize, incoming_depth: usize) -> Self {
        Self {
            outgoing_depth,
            incoming_depth,
            max_depth: outgoing_depth.max(incoming_depth),
        }
    }

    pub fn is_deep(&self) -> bool {
        self.outgoing_depth > DEEP_DEPTH_THRESHOLD || self.incoming_depth > DEEP_DEPTH_THRESHOLD
    }
}

/// A module whose depth exceeds the deep threshold in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeepDependency {
    pub file: ModuleId,
    #[serde(flatten)]
    pub depths: DepthRecord,
}

/// Histogram of depth values (depth -> number of modules).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DepthDistribution {
    pub outgoing: BTreeMap<usize, usize>,
    pub incoming: BTreeMap<usize, usize>,
    pub combined: BTreeMap<usize, usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthStatistics {
    pub total_files: usize,
    /// Rounded to two decimals.
    pub average_outgoing_depth: f64,
    /// Rounded to two decimals.
    pub average_incoming_depth: f64,
    pub max_outgoing_depth: usize,
    pub max_incoming_depth: usize,
    /// Sorted by `max_depth`, descending.
    pub deep_dependencies: Vec<DeepDependency>,
    pub depth_distribution: DepthDistribution,
    pub all_depths: IndexMap<ModuleId, DepthRecord, FxBuildHasher>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepthWarning {
    pub file: ModuleId,
    pub severity: Severity,
    pub message: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Architecture,
    Refactoring,
    Performance,
}

/// Tree-wide suggestion derived from the depth statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub severity: Severity,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepthReport {
    pub statistics: DepthStatistics,
    pub deep_dependency_warnings: Vec<DepthWarning>,
    pub recommendations: Vec<Recommendation>,
}

/// Memoizing depth analyzer over its own snapshot of a dependency graph.
#[derive(Debug, Clone)]
pub struct DepthAnalyzer {
    graph: DenseGraph,
    outgoing_memo: Vec<Option<usize>>,
    incoming_memo: Vec<Option<usize>>,
}

impl DepthAnalyzer {
    pub fn new(graph: &DependencyGraph) -> Self {
        let graph = DenseGraph::from_graph(graph);
        let n = graph.len();
        Self {
            graph,
            outgoing_memo: vec![None; n],
            incoming_memo: vec![None; n],
        }
    }

    /// Longest walk from `id` in `direction`. Unknown modules have depth 0.
    pub fn depth(&mut self, id: &ModuleId, direction: Direction) -> usize {
        match self.graph.index_of(id) {
            Some(node) => self.depth_of(node, direction),
            None => 0,
        }
    }

    pub fn depth_record(&mut self, id: &ModuleId) -> DepthRecord {
        DepthRecord::new(
            self.depth(id, Direction::Outgoing),
            self.depth(id, Direction::Incoming),
        )
    }

    /// Depth records for every module, in graph order.
    pub fn all_depths(&mut self) -> IndexMap<ModuleId, DepthRecord, FxBuildHasher> {
        let mut depths = IndexMap::with_capacity_and_hasher(self.graph.len(), FxBuildHasher);
        for node in 0..self.graph.len() {
            let outgoing = self.depth_of(node, Direction::Outgoing);
            let incoming = self.depth_of(node, Direction::Incoming);
            depths.insert(
                self.graph.id(node).clone(),
                DepthRecord::new(outgoing, incoming),
            );
        }
        depths
    }

    /// Forget memoized depths.
    pub fn clear_cache(&mut self) {
        self.outgoing_memo.fill(None);
        self.incoming_memo.fill(None);
    }

    fn memo(&mut self, direction: Direction) -> &mut Vec<Option<usize>> {
        match direction {
            Direction::Outgoing => &mut self.outgoing_memo,
            Direction::Incoming => &mut self.incoming_memo,
        }
    }

    fn depth_of(&mut self, start: usize, direction: Direction) -> usize {
        if let Some(depth) = self.memo(direction)[start] {
            return depth;
        }

        let mut on_path = FixedBitSet::with_capacity(self.graph.len());
        // (node, index of the next neighbor, best depth so far)
        let mut frames: Vec<(usize, usize, usize)> = vec![(start, 0, 0)];
        on_path.insert(start);

        loop {
            let Some(&(node, next, best)) = frames.last() else {
                return 0;
            };
            let neighbors = self.graph.neighbors(node, direction);

            if let Some(&dep) = neighbors.get(next) {
                let known = self.memo(direction)[dep];
                let frame = frames.len() - 1;
                frames[frame].1 += 1;
                match known {
                    Some(depth) => frames[frame].2 = best.max(depth + 1),
                    None if on_path.contains(dep) => frames[frame].2 = best.max(1),
                    None => {
                        on_path.insert(dep);
                        frames.push((dep, 0, 0));
                    }
                }
                continue;
            }

            frames.pop();
            on_path.set(node, false);
            self.memo(direction)[node] = Some(best);

            match frames.last_mut() {
                Some(parent) => parent.2 = parent.2.max(best + 1),
                None => return best,
            }
        }
    }

    /// Enumerate simple walks from `start`, longest first.
    ///
    /// A walk is recorded once it cannot be extended: every next module is
    /// already on it, or it holds `max_length` modules. Single-module walks
    /// are never recorded.
    pub fn find_chains(
        &self,
        start: &ModuleId,
        direction: Direction,
        max_length: usize,
    ) -> Vec<DependencyChain> {
        let Some(start) = self.graph.index_of(start) else {
            return Vec::new();
        };

        let mut chains = Vec::new();
        let mut on_path = FixedBitSet::with_capacity(self.graph.len());
        let mut path: Vec<usize> = Vec::new();
        let mut frames: Vec<(usize, usize)> = Vec::new();

        self.enter_chain(start, direction, max_length, &mut path, &mut on_path, &mut frames, &mut chains);

        while let Some(&(node, next)) = frames.last() {
            let neighbors = self.graph.neighbors(node, direction);
            match neighbors.get(next) {
                Some(&dep) => {
                    let top = frames.len() - 1;
                    frames[top].1 += 1;
                    if !on_path.contains(dep) {
                        self.enter_chain(dep, direction, max_length, &mut path, &mut on_path, &mut frames, &mut chains);
                    }
                }
                None => {
                    frames.pop();
                    path.pop();
                    on_path.set(node, false);
                }
            }
        }

        chains.sort_by(|a, b| b.len().cmp(&a.len()));
        chains
    }

    #[allow(clippy::too_many_arguments)]
    fn enter_chain(
        &self,
        node: usize,
        direction: Direction,
        max_length: usize,
        path: &mut Vec<usize>,
        on_path: &mut FixedBitSet,
        frames: &mut Vec<(usize, usize)>,
        chains: &mut Vec<DependencyChain>,
    ) {
        path.push(node);
        on_path.insert(node);

        let extendable = path.len() < max_length
            && self
                .graph
                .neighbors(node, direction)
                .iter()
                .any(|&dep| !on_path.contains(dep));

        if extendable {
            frames.push((node, 0));
        } else {
            if path.len() > 1 {
                chains.push(DependencyChain::new(self.graph.path_ids(path)));
            }
            // finished frame: popped on the next iteration
            frames.push((node, usize::MAX));
        }
    }

    pub fn statistics(&mut self) -> DepthStatistics {
        let all_depths = self.all_depths();
        let total = all_depths.len();
        if total == 0 {
            return DepthStatistics::default();
        }

        let outgoing_sum: usize = all_depths.values().map(|d| d.outgoing_depth).sum();
        let incoming_sum: usize = all_depths.values().map(|d| d.incoming_depth).sum();

        let mut deep_dependencies: Vec<DeepDependency> = all_depths
            .iter()
            .filter(|(_, depths)| depths.is_deep())
            .map(|(file, depths)| DeepDependency {
                file: file.clone(),
                depths: *depths,
            })
            .collect();
        deep_dependencies.sort_by(|a, b| b.depths.max_depth.cmp(&a.depths.max_depth));

        let mut distribution = DepthDistribution::default();
        for depths in all_depths.values() {
            *distribution.outgoing.entry(depths.outgoing_depth).or_default() += 1;
            *distribution.incoming.entry(depths.incoming_depth).or_default() += 1;
            *distribution.combined.entry(depths.max_depth).or_default() += 1;
        }

        DepthStatistics {
            total_files: total,
            average_outgoing_depth: round2(outgoing_sum as f64 / total as f64),
            average_incoming_depth: round2(incoming_sum as f64 / total as f64),
            max_outgoing_depth: all_depths.values().map(|d| d.outgoing_depth).max().unwrap_or(0),
            max_incoming_depth: all_depths.values().map(|d| d.incoming_depth).max().unwrap_or(0),
            deep_dependencies,
            depth_distribution: distribution,
            all_depths,
        }
    }

    pub fn report(&mut self) -> DepthReport {
        let statistics = self.statistics();
        DepthReport {
            deep_dependency_warnings: depth_warnings(&statistics.deep_dependencies),
            recommendations: recommendations(&statistics),
            statistics,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn depth_severity(depth: usize) -> Severity {
    if depth > CRITICAL_DEPTH_THRESHOLD {
        Severity::Critical
    } else if depth > DEEP_DEPTH_THRESHOLD {
        Severity::Warning
    } else {
        Severity::Info
    }
}

fn depth_recommendation(depth: usize) -> &'static str {
    match depth_severity(depth) {
        Severity::Critical => {
            "Consider breaking down this module or refactoring the dependency structure"
        }
        Severity::Warning => "Review the dependency chain and consider simplification",
        Severity::Info => "Dependency depth is within acceptable range",
    }
}

fn depth_warnings(deep: &[DeepDependency]) -> Vec<DepthWarning> {
    deep.iter()
        .map(|dep| DepthWarning {
            file: dep.file.clone(),
            severity: depth_severity(dep.depths.max_depth),
            message: format!(
                "File has deep dependency chains (outgoing: {}, incoming: {})",
                dep.depths.outgoing_depth, dep.depths.incoming_depth
            ),
            recommendation: depth_recommendation(dep.depths.max_depth).to_string(),
        })
        .collect()
}

fn recommendations(statistics: &DepthStatistics) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if statistics.average_outgoing_depth > HIGH_AVERAGE_DEPTH {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Architecture,
            severity: Severity::Warning,
            message: format!(
                "Average outgoing dependency depth ({}) is high",
                statistics.average_outgoing_depth
            ),
            suggestion: "Consider implementing a more modular architecture with clearer separation of concerns".to_string(),
        });
    }

    if statistics.deep_dependencies.len() as f64 > statistics.total_files as f64 * DEEP_SHARE_THRESHOLD {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Refactoring,
            severity: Severity::Warning,
            message: format!(
                "{} files have deep dependency chains",
                statistics.deep_dependencies.len()
            ),
            suggestion: "Consider refactoring deeply nested dependencies to reduce complexity".to_string(),
        });
    }

    if statistics.max_outgoing_depth > VERY_HIGH_MAX_DEPTH {
        recommendations.push(Recommendation {
            kind: RecommendationKind::Performance,
            severity: Severity::Critical,
            message: format!(
                "Maximum dependency depth ({}) is very high",
                statistics.max_outgoing_depth
            ),
            suggestion: "This may impact bundle size and loading performance. Consider code splitting or lazy loading".to_string(),
        });
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ModuleId {
        ModuleId::new(s)
    }

    fn graph(nodes: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let mut graph = DependencyGraph::new();
        for node in nodes {
            graph.add_module(id(node));
        }
        for (from, to) in edges {
            graph.add_dependency(&id(from), &id(to), None);
        }
        graph
    }

    /// m0 -> m1 -> ... -> m{n-1}
    fn line(n: usize) -> DependencyGraph {
        let names: Vec<String> = (0..n).map(|i| format!("m{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let edges: Vec<(&str, &str)> = refs.windows(2).map(|w| (w[0], w[1])).collect();
        graph(&refs, &edges)
    }

    #[test]
    fn test_linear_depths() {
        let mut analyzer = DepthAnalyzer::new(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));
        assert_eq!(analyzer.depth(&id("a"), Direction::Outgoing), 2);
        assert_eq!(analyzer.depth(&id("b"), Direction::Outgoing), 1);
        assert_eq!(analyzer.depth(&id("c"), Direction::Outgoing), 0);
        assert_eq!(analyzer.depth(&id("c"), Direction::Incoming), 2);
        assert_eq!(analyzer.depth_record(&id("b")), DepthRecord::new(1, 1));
        assert_eq!(analyzer.depth(&id("unknown"), Direction::Outgoing), 0);
    }

    #[test]
    fn test_longest_branch_wins() {
        // a -> d directly and a -> b -> c -> d
        let mut analyzer = DepthAnalyzer::new(&graph(
            &["a", "b", "c", "d"],
            &[("a", "d"), ("a", "b"), ("b", "c"), ("c", "d")],
        ));
        assert_eq!(analyzer.depth(&id("a"), Direction::Outgoing), 3);
    }

    #[test]
    fn test_cycle_terminates() {
        let mut analyzer = DepthAnalyzer::new(&graph(&["a", "b"], &[("a", "b"), ("b", "a")]));
        // a: b sees a on the walk (0), so b = 1 and a = 2; b is memoized at 1
        assert_eq!(analyzer.depth(&id("a"), Direction::Outgoing), 2);
        assert_eq!(analyzer.depth(&id("b"), Direction::Outgoing), 1);
    }

    #[test]
    fn test_statistics_and_distribution() {
        let mut analyzer = DepthAnalyzer::new(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));
        let stats = analyzer.statistics();

        assert_eq!(stats.total_files, 3);
        assert_eq!(stats.average_outgoing_depth, 1.0);
        assert_eq!(stats.max_outgoing_depth, 2);
        assert_eq!(stats.max_incoming_depth, 2);
        assert!(stats.deep_dependencies.is_empty());
        assert_eq!(stats.depth_distribution.outgoing, BTreeMap::from([(0, 1), (1, 1), (2, 1)]));
        assert_eq!(stats.depth_distribution.combined, BTreeMap::from([(1, 1), (2, 2)]));
        assert_eq!(stats.all_depths[&id("a")], DepthRecord::new(2, 0));
    }

    #[test]
    fn test_average_is_rounded() {
        // depths 1, 0, 0 -> 0.333...
        let mut analyzer = DepthAnalyzer::new(&graph(&["a", "b", "c"], &[("a", "b")]));
        assert_eq!(analyzer.statistics().average_outgoing_depth, 0.33);
    }

    #[test]
    fn test_empty_graph_statistics() {
        let report = DepthAnalyzer::new(&DependencyGraph::new()).report();
        assert_eq!(report.statistics, DepthStatistics::default());
        assert!(report.deep_dependency_warnings.is_empty());
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn test_deep_chain_warnings_and_recommendations() {
        // 12 modules in a line: m0 has outgoing depth 11
        let mut analyzer = DepthAnalyzer::new(&line(12));
        let report = analyzer.report();
        let stats = &report.statistics;

        assert_eq!(stats.max_outgoing_depth, 11);
        assert_eq!(stats.deep_dependencies[0].file, id("m0"));
        assert_eq!(stats.deep_dependencies[0].depths.max_depth, 11);
        // m0..m5 (outgoing > 5) and m6..m11 (incoming > 5)
        assert_eq!(stats.deep_dependencies.len(), 12);

        let first = &report.deep_dependency_warnings[0];
        assert_eq!(first.severity, Severity::Critical);
        assert_eq!(first.message, "File has deep dependency chains (outgoing: 11, incoming: 0)");

        let kinds: Vec<_> = report.recommendations.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecommendationKind::Architecture,
                RecommendationKind::Refactoring,
                RecommendationKind::Performance
            ]
        );
        assert_eq!(report.recommendations[0].message, "Average outgoing dependency depth (5.5) is high");
        assert_eq!(report.recommendations[2].message, "Maximum dependency depth (11) is very high");
    }

    #[test]
    fn test_depth_severity_bands() {
        assert_eq!(depth_severity(9), Severity::Critical);
        assert_eq!(depth_severity(8), Severity::Warning);
        assert_eq!(depth_severity(6), Severity::Warning);
        assert_eq!(depth_severity(5), Severity::Info);
        assert_eq!(depth_recommendation(3), "Dependency depth is within acceptable range");
    }

    #[test]
    fn test_find_chains_longest_first() {
        let analyzer = DepthAnalyzer::new(&graph(
            &["a", "b", "c", "d"],
            &[("a", "d"), ("a", "b"), ("b", "c")],
        ));
        let chains: Vec<String> = analyzer
            .find_chains(&id("a"), Direction::Outgoing, 10)
            .iter()
            .map(DependencyChain::format_chain)
            .collect();
        assert_eq!(chains, vec!["a -> b -> c", "a -> d"]);
    }

    #[test]
    fn test_find_chains_stops_at_cycle_and_max_length() {
        let analyzer = DepthAnalyzer::new(&graph(&["a", "b"], &[("a", "b"), ("b", "a")]));
        let chains = analyzer.find_chains(&id("a"), Direction::Outgoing, 10);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].format_chain(), "a -> b");

        let analyzer = DepthAnalyzer::new(&line(5));
        let chains = analyzer.find_chains(&id("m0"), Direction::Outgoing, 3);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].len(), 3);

        let incoming = analyzer.find_chains(&id("m4"), Direction::Incoming, 10);
        assert_eq!(incoming[0].format_chain(), "m4 -> m3 -> m2 -> m1 -> m0");
    }

    #[test]
    fn test_find_chains_isolated_or_unknown() {
        let analyzer = DepthAnalyzer::new(&graph(&["a"], &[]));
        assert!(analyzer.find_chains(&id("a"), Direction::Outgoing, 10).is_empty());
        assert!(analyzer.find_chains(&id("zzz"), Direction::Outgoing, 10).is_empty());
    }
}
