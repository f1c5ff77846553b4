use rustc_hash::FxHashMap;
use serde::Serialize;

use super::DependencyGraph;
use crate::module_id::ModuleId;

/// Edge direction followed by a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Direction {
    Outgoing,
    Incoming,
}

/// Arena-indexed, read-only snapshot of a [`DependencyGraph`].
///
/// Node `i` is the `i`-th module in graph insertion order and adjacency lists
/// keep the graph's neighbor order, so traversals over the snapshot visit
/// nodes in exactly the order they would over the map.
#[derive(Debug, Clone)]
pub struct DenseGraph {
    ids: Vec<ModuleId>,
    index: FxHashMap<ModuleId, usize>,
    outgoing: Vec<Vec<usize>>,
    incoming: Vec<Vec<usize>>,
}

impl DenseGraph {
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let ids: Vec<ModuleId> = graph.modules().cloned().collect();
        let index: FxHashMap<ModuleId, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.clone(), i))
            .collect();

        let to_indices = |neighbors: &super::ModuleSet| -> Vec<usize> {
            neighbors
                .iter()
                .filter_map(|id| index.get(id).copied())
                .collect()
        };

        let mut outgoing = Vec::with_capacity(ids.len());
        let mut incoming = Vec::with_capacity(ids.len());
        for (_, edges) in graph.iter() {
            outgoing.push(to_indices(&edges.outgoing));
            incoming.push(to_indices(&edges.incoming));
        }

        Self {
            ids,
            index,
            outgoing,
            incoming,
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn index_of(&self, id: &ModuleId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn id(&self, node: usize) -> &ModuleId {
        &self.ids[node]
    }

    pub fn ids(&self) -> &[ModuleId] {
        &self.ids
    }

    pub fn neighbors(&self, node: usize, direction: Direction) -> &[usize] {
        match direction {
            Direction::Outgoing => &self.outgoing[node],
            Direction::Incoming => &self.incoming[node],
        }
    }

    /// Map a path of indices back to module ids.
    pub fn path_ids(&self, path: &[usize]) -> Vec<ModuleId> {
        path.iter().map(|&node| self.ids[node].clone()).collect()
    }
}
