//! Property-based tests using proptest.
//!
//! Random import graphs are written into in-memory trees and pushed through
//! the whole pipeline, so the invariants are checked on the reports callers
//! actually see.

use proptest::prelude::*;

use super::test_helpers::{memory_analyzer, memory_project};
use crate::graph::DependencyGraph;
use crate::report::FolderReport;
use crate::{ModuleId, Severity};

/// Up to 8 modules and a list of `(importer, imported)` index pairs.
fn import_graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..=8).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..=20)))
}

/// Render the graph as a tree of `m{i}.js` files.
fn render_tree(n: usize, edges: &[(usize, usize)]) -> Vec<(String, String)> {
    (0..n)
        .map(|i| {
            let content: String = edges
                .iter()
                .filter(|(from, _)| *from == i)
                .map(|(_, to)| format!("import {{ v{} }} from './m{}';\n", to, to))
                .collect();
            (format!("m{}.js", i), content)
        })
        .collect()
}

fn analyze(n: usize, edges: &[(usize, usize)]) -> FolderReport {
    let files = render_tree(n, edges);
    let refs: Vec<(&str, &str)> = files.iter().map(|(p, c)| (p.as_str(), c.as_str())).collect();
    let (analyzer, _) = memory_analyzer(memory_project(&refs));

    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(analyzer.analyze_folder())
        .unwrap()
}

fn has_edge(report: &FolderReport, from: &ModuleId, to: &ModuleId) -> bool {
    report
        .file(from.as_str())
        .is_some_and(|f| f.outgoing.contains(to))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// b ∈ outgoing(a) ⟺ a ∈ incoming(b), and a ∉ outgoing(a)
    #[test]
    fn prop_edges_are_mirrored_without_self_edges((n, edges) in import_graph_strategy()) {
        let report = analyze(n, &edges);
        prop_assert_eq!(report.total_files, n);

        for file in &report.files {
            prop_assert!(!file.outgoing.contains(&file.file));
            for dependency in &file.outgoing {
                let other = report.file(dependency.as_str()).unwrap();
                prop_assert!(other.incoming.contains(&file.file));
            }
            for importer in &file.incoming {
                prop_assert!(has_edge(&report, importer, &file.file));
            }
        }
    }

    /// Every reported cycle is closed, walks real edges, and carries the severity of its size.
    #[test]
    fn prop_cycles_are_valid((n, edges) in import_graph_strategy()) {
        let report = analyze(n, &edges);
        let circular = &report.circular_dependencies;

        prop_assert_eq!(
            circular.total_circular_dependencies,
            circular.critical + circular.warnings + circular.info
        );
        for cycle in &circular.circular_dependencies {
            let path = &cycle.cycle;
            prop_assert!(path.len() >= 3);
            prop_assert_eq!(path.first(), path.last());
            for pair in path.windows(2) {
                prop_assert!(has_edge(&report, &pair[0], &pair[1]));
            }

            let expected = match cycle.members().len() {
                0..=2 => Severity::Critical,
                3 | 4 => Severity::Warning,
                _ => Severity::Info,
            };
            prop_assert_eq!(cycle.severity, expected);
        }
    }

    /// maxDepth = max(outgoing, incoming); leaves have outgoing depth 0.
    #[test]
    fn prop_depth_records_are_consistent((n, edges) in import_graph_strategy()) {
        let report = analyze(n, &edges);
        let stats = &report.depth_analysis.statistics;

        prop_assert_eq!(stats.all_depths.len(), n);
        for (id, record) in &stats.all_depths {
            prop_assert_eq!(record.max_depth, record.outgoing_depth.max(record.incoming_depth));

            let file = report.file(id.as_str()).unwrap();
            if file.outgoing.is_empty() {
                prop_assert_eq!(record.outgoing_depth, 0);
            } else {
                prop_assert!(record.outgoing_depth >= 1);
            }
            if file.incoming.is_empty() {
                prop_assert_eq!(record.incoming_depth, 0);
            }
        }
    }

    /// Two runs over an unchanged tree produce identical reports.
    #[test]
    fn prop_folder_analysis_is_idempotent((n, edges) in import_graph_strategy()) {
        prop_assert_eq!(analyze(n, &edges), analyze(n, &edges));
    }

    /// Mirroring holds for direct graph construction too, including rejected edges.
    #[test]
    fn prop_graph_insertions_stay_mirrored(
        n in 1usize..=6,
        edges in prop::collection::vec((0usize..8, 0usize..8), 0..=24),
    ) {
        let id = |i: usize| ModuleId::new(format!("m{}", i));
        let mut graph = DependencyGraph::new();
        for i in 0..n {
            graph.add_module(id(i));
        }
        for (from, to) in &edges {
            let added = graph.add_dependency(&id(*from), &id(*to), None);
            prop_assert_eq!(added, from != to && *from < n && *to < n);
        }

        prop_assert_eq!(graph.len(), n);
        for module in graph.modules() {
            prop_assert!(graph.dependencies(module).all(|d| d != module));
            for dependency in graph.dependencies(module) {
                prop_assert!(graph.dependents(dependency).any(|d| d == module));
            }
        }
    }
}
