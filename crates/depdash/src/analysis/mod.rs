//! Graph analyses: circular dependencies and dependency depth.
//!
//! Both analyzers take a [`DependencyGraph`](crate::graph::DependencyGraph)
//! by reference and build their own [`DenseGraph`](crate::graph::DenseGraph)
//! snapshot, so they never mutate or share state with the builder or with
//! each other.

mod chain;
mod circular;
mod depth;

pub use chain::DependencyChain;
pub use circular::{CircularDependency, CircularDependencyDetector, CircularReport};
pub use depth::{
    DeepDependency, DepthAnalyzer, DepthDistribution, DepthRecord, DepthReport, DepthStatistics,
    DepthWarning, Recommendation, RecommendationKind,
};

use serde::Serialize;
use std::fmt;

/// Severity shared by cycle reports, depth warnings and recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Critical => write!(f, "critical"),
        }
    }
}
