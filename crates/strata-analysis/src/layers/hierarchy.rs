//! Hierarchy inference from observed dependency direction.

use rustc_hash::FxHashMap;

use crate::graph::DependencyGraph;

use super::Layer;

/// Re-level layers by aggregate inbound weight from cross-layer edges.
///
/// Layers are sorted ascending by inbound weight — ties broken by the
/// classifier's initial level, then id — and `level` becomes the sorted
/// index. The most depended-upon layers end up with the highest level,
/// i.e. at the bottom of the diagram, matching the convention that
/// dependencies flow downward. Returns layers in ascending-level order.
pub fn infer_hierarchy(layers: &mut Vec<Layer>, graph: &DependencyGraph) {
    let layer_of: FxHashMap<&str, &str> = layers
        .iter()
        .flat_map(|l| l.modules.iter().map(move |m| (m.as_str(), l.id.as_str())))
        .collect();

    let mut inbound: FxHashMap<&str, u64> = FxHashMap::default();
    for edge in &graph.edges {
        let (Some(&src), Some(&dst)) = (
            layer_of.get(edge.source.as_str()),
            layer_of.get(edge.target.as_str()),
        ) else {
            continue;
        };
        if src != dst {
            *inbound.entry(dst).or_insert(0) += u64::from(edge.weight);
        }
    }

    let weight_of: FxHashMap<String, u64> = layers
        .iter()
        .map(|l| {
            (
                l.id.clone(),
                inbound.get(l.id.as_str()).copied().unwrap_or(0),
            )
        })
        .collect();

    layers.sort_by(|a, b| {
        weight_of[&a.id]
            .cmp(&weight_of[&b.id])
            .then_with(|| a.level.cmp(&b.level))
            .then_with(|| a.id.cmp(&b.id))
    });

    for (idx, layer) in layers.iter_mut().enumerate() {
        layer.level = idx as i32;
    }
}
