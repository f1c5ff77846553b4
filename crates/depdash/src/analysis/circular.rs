//! Circular dependency detection.
//!
//! White/gray/black depth-first search over outgoing edges. Every time the
//! walk reaches a module that is still on the current path, the slice of the
//! path from that module's position, closed with the module itself, is
//! reported. Modules finished in one walk are never used as a starting point
//! again, but the same simple cycle may still be reported more than once when
//! it is entered from different places. Reports are not deduplicated.

use fixedbitset::FixedBitSet;
use serde::Serialize;

use super::Severity;
use crate::graph::{DenseGraph, DependencyGraph, Direction};
use crate::module_id::ModuleId;

/// Arrow used between modules in cycle descriptions.
const CYCLE_ARROW: &str = " → ";

/// A closed walk `[m1, ..., mk, m1]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircularDependency {
    pub cycle: Vec<ModuleId>,
    pub severity: Severity,
    pub description: String,
}

impl CircularDependency {
    fn new(cycle: Vec<ModuleId>) -> Self {
        let severity = severity_for(cycle.len().saturating_sub(1));
        let description = format!(
            "Circular dependency detected: {}",
            cycle
                .iter()
                .map(ModuleId::as_str)
                .collect::<Vec<_>>()
                .join(CYCLE_ARROW)
        );
        Self {
            cycle,
            severity,
            description,
        }
    }

    /// Distinct modules taking part, without the closing repetition.
    pub fn members(&self) -> &[ModuleId] {
        let end = self.cycle.len().saturating_sub(1);
        &self.cycle[..end]
    }
}

/// Severity by number of distinct modules in the cycle.
///
/// Two modules importing each other is the tightest possible loop.
fn severity_for(members: usize) -> Severity {
    match members {
        0..=2 => Severity::Critical,
        3 | 4 => Severity::Warning,
        _ => Severity::Info,
    }
}

/// Cycle list plus per-severity counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircularReport {
    pub total_circular_dependencies: usize,
    pub critical: usize,
    pub warnings: usize,
    pub info: usize,
    pub circular_dependencies: Vec<CircularDependency>,
}

impl CircularReport {
    pub fn from_cycles(cycles: Vec<CircularDependency>) -> Self {
        let count = |severity| cycles.iter().filter(|c| c.severity == severity).count();
        Self {
            total_circular_dependencies: cycles.len(),
            critical: count(Severity::Critical),
            warnings: count(Severity::Warning),
            info: count(Severity::Info),
            circular_dependencies: cycles,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.circular_dependencies.is_empty()
    }
}

/// Detector over its own snapshot of a dependency graph.
#[derive(Debug, Clone)]
pub struct CircularDependencyDetector {
    graph: DenseGraph,
}

impl CircularDependencyDetector {
    pub fn new(graph: &DependencyGraph) -> Self {
        Self {
            graph: DenseGraph::from_graph(graph),
        }
    }

    /// Run detection over every module, in graph insertion order.
    pub fn detect(&self) -> Vec<CircularDependency> {
        let n = self.graph.len();
        let mut visited = FixedBitSet::with_capacity(n);
        let mut on_stack = FixedBitSet::with_capacity(n);
        let mut path: Vec<usize> = Vec::new();
        // (node, index of the next neighbor to explore)
        let mut frames: Vec<(usize, usize)> = Vec::new();
        let mut cycles = Vec::new();

        for start in 0..n {
            if visited.contains(start) {
                continue;
            }
            visited.insert(start);
            on_stack.insert(start);
            path.push(start);
            frames.push((start, 0));

            while let Some(frame) = frames.last_mut() {
                let (node, next) = *frame;
                let neighbors = self.graph.neighbors(node, Direction::Outgoing);

                let Some(&dep) = neighbors.get(next) else {
                    frames.pop();
                    path.pop();
                    on_stack.set(node, false);
                    continue;
                };
                frame.1 += 1;

                if on_stack.contains(dep) {
                    if let Some(pos) = path.iter().position(|&m| m == dep) {
                        let mut cycle = self.graph.path_ids(&path[pos..]);
                        cycle.push(self.graph.id(dep).clone());
                        cycles.push(CircularDependency::new(cycle));
                    }
                } else if !visited.contains(dep) {
                    visited.insert(dep);
                    on_stack.insert(dep);
                    path.push(dep);
                    frames.push((dep, 0));
                }
            }
        }

        tracing::debug!("Found {} circular dependencies", cycles.len());
        cycles
    }

    pub fn report(&self) -> CircularReport {
        CircularReport::from_cycles(self.detect())
    }
}
