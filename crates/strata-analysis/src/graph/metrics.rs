//! Degree and coupling computations.

use petgraph::visit::EdgeRef;

use super::builder::BuildGraph;
use super::types::ModuleNode;

/// Normalized coupling above this value marks a module as highly coupled.
pub const HIGH_COUPLING_THRESHOLD: f64 = 0.7;

/// Recompute per-node in/out degrees as the sum of incident edge weights,
/// then normalize coupling against the largest total degree observed.
pub(crate) fn apply_degrees_and_coupling(graph: &mut BuildGraph) {
    for node in graph.node_weights_mut() {
        node.in_degree = 0;
        node.out_degree = 0;
    }

    let increments: Vec<(petgraph::graph::NodeIndex, petgraph::graph::NodeIndex, u32)> = graph
        .edge_references()
        .map(|e| (e.source(), e.target(), e.weight().weight))
        .collect();
    for (source, target, weight) in increments {
        graph[source].out_degree += weight;
        graph[target].in_degree += weight;
    }

    let max_total = graph
        .node_weights()
        .map(|n| n.total_degree())
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    for node in graph.node_weights_mut() {
        node.coupling = f64::from(node.total_degree()) / max_total;
    }
}

/// Modules whose normalized coupling exceeds the threshold, path order.
pub fn high_coupling_modules<'a>(nodes: impl Iterator<Item = &'a ModuleNode>) -> Vec<String> {
    nodes
        .filter(|n| n.coupling > HIGH_COUPLING_THRESHOLD)
        .map(|n| n.path.clone())
        .collect()
}

/// Non-entry-point modules nothing imports, path order.
pub fn orphan_modules<'a>(nodes: impl Iterator<Item = &'a ModuleNode>) -> Vec<String> {
    nodes
        .filter(|n| n.in_degree == 0 && !n.is_entry_point)
        .map(|n| n.path.clone())
        .collect()
}
