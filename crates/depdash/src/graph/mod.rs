//! Dependency graph storage.
//!
//! [`DependencyGraph`] keeps, per module, the set of modules it imports and
//! the set of modules importing it. Edges are always inserted in both
//! directions at once, so `b ∈ outgoing(a)` holds exactly when
//! `a ∈ incoming(b)`. Import details are kept per ordered pair, one entry per
//! import occurrence, in scan order.

mod builder;
mod dense;

pub use builder::{DetailMap, GraphBuilder, TargetEdges, TargetMatcher};
pub use dense::{DenseGraph, Direction};

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;
use serde::Serialize;
use std::fmt::Write as _;

use crate::module_id::ModuleId;

pub type ModuleSet = IndexSet<ModuleId, FxBuildHasher>;

/// Edges of one module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModuleEdges {
    /// Modules importing this one.
    pub incoming: ModuleSet,
    /// Modules this one imports.
    pub outgoing: ModuleSet,
}

/// Adjacency structure keyed by module id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: IndexMap<ModuleId, ModuleEdges, FxBuildHasher>,
    details: IndexMap<(ModuleId, ModuleId), Vec<String>, FxBuildHasher>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node. Returns `false` if it was already present.
    pub fn add_module(&mut self, id: ModuleId) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id, ModuleEdges::default());
        true
    }

    /// Add an edge `from -> to`, creating forward and reverse mappings.
    ///
    /// Self edges and edges touching unknown modules are rejected. A repeated
    /// edge keeps a single adjacency entry but still records its detail.
    pub fn add_dependency(&mut self, from: &ModuleId, to: &ModuleId, detail: Option<String>) -> bool {
        if from == to || !self.nodes.contains_key(from) || !self.nodes.contains_key(to) {
            return false;
        }

        if let Some(edges) = self.nodes.get_mut(from) {
            edges.outgoing.insert(to.clone());
        }
        if let Some(edges) = self.nodes.get_mut(to) {
            edges.incoming.insert(from.clone());
        }

        if let Some(detail) = detail {
            self.details
                .entry((from.clone(), to.clone()))
                .or_default()
                .push(detail);
        }

        true
    }

    pub fn contains(&self, id: &ModuleId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct directed edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|edges| edges.outgoing.len()).sum()
    }

    pub fn modules(&self) -> impl Iterator<Item = &ModuleId> {
        self.nodes.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleId, &ModuleEdges)> {
        self.nodes.iter()
    }

    pub fn edges(&self, id: &ModuleId) -> Option<&ModuleEdges> {
        self.nodes.get(id)
    }

    /// Modules imported by `id`.
    pub fn dependencies(&self, id: &ModuleId) -> impl Iterator<Item = &ModuleId> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|edges| edges.outgoing.iter())
    }

    /// Modules importing `id`.
    pub fn dependents(&self, id: &ModuleId) -> impl Iterator<Item = &ModuleId> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|edges| edges.incoming.iter())
    }

    /// Details recorded for `from -> to`, in scan order.
    pub fn import_details(&self, from: &ModuleId, to: &ModuleId) -> &[String] {
        self.details
            .get(&(from.clone(), to.clone()))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Human-readable adjacency listing used for verbose dumps.
    pub fn matrix_dump(&self) -> String {
        let mut out = String::new();
        for (id, edges) in &self.nodes {
            let outgoing: Vec<&str> = edges.outgoing.iter().map(ModuleId::as_str).collect();
            let incoming: Vec<&str> = edges.incoming.iter().map(ModuleId::as_str).collect();
            let _ = writeln!(out, "  {}:", id);
            let _ = writeln!(out, "    outgoing: {}", outgoing.join(", "));
            let _ = writeln!(out, "    incoming: {}", incoming.join(", "));
        }
        out
    }
}
