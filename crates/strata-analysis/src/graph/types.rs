//! Public graph types.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::parsers::ImportKind;
use crate::scanner::Language;

/// Basenames (sans extension, case-folded) that mark a module as an
/// entry point.
pub const ENTRY_POINT_STEMS: &[&str] = &["index", "main", "app", "server", "cli", "entry"];

/// One module in the dependency graph, keyed by relative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleNode {
    /// Root-relative forward-slash path; the identity key.
    pub path: String,
    /// Display name: basename without extension, or the parent directory
    /// for `index` files.
    pub name: String,
    /// Source language.
    pub language: Language,
    /// True when the basename is a conventional entry-point name.
    pub is_entry_point: bool,
    /// Sum of weights of incoming edges.
    pub in_degree: u32,
    /// Sum of weights of outgoing edges.
    pub out_degree: u32,
    /// (in + out) normalized by the highest total degree observed, in [0, 1].
    pub coupling: f64,
    /// Layer id, set by the classifier.
    pub layer: Option<String>,
}

impl ModuleNode {
    /// Total degree, the centrality measure used for ordering.
    pub fn total_degree(&self) -> u32 {
        self.in_degree + self.out_degree
    }
}

/// A weighted dependency edge. Parallel imports between the same pair of
/// modules are collapsed: weight counts them, `kinds` unions their forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleEdge {
    pub source: String,
    pub target: String,
    pub weight: u32,
    pub kinds: BTreeSet<ImportKind>,
}

/// The complete dependency graph for one analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Modules keyed by relative path, iterated in path order.
    pub nodes: BTreeMap<String, ModuleNode>,
    /// Edges sorted by (source, target).
    pub edges: Vec<ModuleEdge>,
    /// External package names encountered during resolution.
    pub external_dependencies: BTreeSet<String>,
    /// Cycles in discovery order. Each cycle repeats its first node at
    /// the end.
    pub cycles: Vec<Vec<String>>,
}

impl DependencyGraph {
    /// Convenience for tests and consumers: the edge between two paths.
    pub fn edge(&self, source: &str, target: &str) -> Option<&ModuleEdge> {
        self.edges
            .iter()
            .find(|e| e.source == source && e.target == target)
    }
}
