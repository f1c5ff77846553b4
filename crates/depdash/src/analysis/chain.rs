use serde::Serialize;

use crate::module_id::ModuleId;

/// One concrete walk through the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyChain {
    /// Module ids from the start of the walk to its end.
    pub path: Vec<ModuleId>,
    /// Number of edges walked (path length - 1).
    pub depth: usize,
}

impl DependencyChain {
    pub fn new(path: Vec<ModuleId>) -> Self {
        let depth = path.len().saturating_sub(1);
        Self { path, depth }
    }

    pub fn start(&self) -> Option<&ModuleId> {
        self.path.first()
    }

    pub fn end(&self) -> Option<&ModuleId> {
        self.path.last()
    }

    /// Number of modules in the chain.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Example: "src/app -> src/lib -> src/util"
    pub fn format_chain(&self) -> String {
        self.path
            .iter()
            .map(ModuleId::as_str)
            .collect::<Vec<_>>()
            .join(" -> ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_accessors() {
        let chain = DependencyChain::new(vec![
            ModuleId::new("app"),
            ModuleId::new("lib"),
            ModuleId::new("util"),
        ]);
        assert_eq!(chain.depth, 2);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.start().map(ModuleId::as_str), Some("app"));
        assert_eq!(chain.end().map(ModuleId::as_str), Some("util"));
        assert_eq!(chain.format_chain(), "app -> lib -> util");
    }

    #[test]
    fn test_empty_chain() {
        let chain = DependencyChain::new(Vec::new());
        assert_eq!(chain.depth, 0);
        assert!(chain.is_empty());
    }
}
