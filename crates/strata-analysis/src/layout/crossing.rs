//! Barycenter crossing minimization.
//!
//! A single top-down sweep: each layer after the first is reordered by
//! the mean index of its inbound neighbors in the previous layer. Nodes
//! with no inbound neighbor in the previous layer keep their relative
//! order at the end. A quality pass only — correctness never depends on
//! the ordering it produces.

use rustc_hash::FxHashMap;

/// Reorder `layers` in place given directed `edges` (source, target).
pub fn minimize_crossings(layers: &mut [Vec<String>], edges: &[(String, String)]) {
    for i in 1..layers.len() {
        let prev_index: FxHashMap<&str, usize> = layers[i - 1]
            .iter()
            .enumerate()
            .map(|(idx, n)| (n.as_str(), idx))
            .collect();

        let barycenter = |node: &str| -> Option<f64> {
            let positions: Vec<usize> = edges
                .iter()
                .filter(|(_, target)| target == node)
                .filter_map(|(source, _)| prev_index.get(source.as_str()).copied())
                .collect();
            if positions.is_empty() {
                None
            } else {
                Some(positions.iter().sum::<usize>() as f64 / positions.len() as f64)
            }
        };

        let mut keyed: Vec<(Option<f64>, usize, String)> = layers[i]
            .iter()
            .enumerate()
            .map(|(idx, node)| (barycenter(node), idx, node.clone()))
            .collect();

        keyed.sort_by(|a, b| match (a.0, b.0) {
            (Some(x), Some(y)) => x
                .partial_cmp(&y)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.1.cmp(&b.1)),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => a.1.cmp(&b.1),
        });

        layers[i] = keyed.into_iter().map(|(_, _, node)| node).collect();
    }
}
