//! Layer assignment.

use rustc_hash::FxHashMap;

use strata_core::ProjectConfig;

use crate::graph::DependencyGraph;

use super::palette;
use super::rules::{self, FALLBACK_LEVEL};
use super::Layer;

/// Assign every module to a layer. Sets `layer` on each graph node and
/// returns the layers sorted by (initial level, id), members ordered by
/// centrality descending with path ties ascending.
///
/// Reordering grouping rules in the config changes the outcome for
/// modules matching multiple rules; first match wins is surface behavior.
pub fn classify(graph: &mut DependencyGraph, config: &ProjectConfig) -> Vec<Layer> {
    let mut rule_set = rules::user_rules(&config.grouping);
    rule_set.extend(rules::built_in_rules().iter().cloned());

    // Grouping-rule colors behave like style entries for their layer.
    let mut rule_colors: FxHashMap<String, String> = FxHashMap::default();
    for rule in &config.grouping {
        if let Some(color) = &rule.color {
            rule_colors
                .entry(rules::slug(&rule.label))
                .or_insert_with(|| color.clone());
        }
    }

    let mut order: Vec<String> = Vec::new();
    let mut layers: FxHashMap<String, Layer> = FxHashMap::default();

    for node in graph.nodes.values_mut() {
        let normalized = node.path.to_lowercase();
        let (layer_id, level) = match rule_set.iter().find(|r| r.regex.is_match(&normalized)) {
            Some(rule) => (rule.layer_id.clone(), rule.level),
            None => (fallback_layer(&normalized), FALLBACK_LEVEL),
        };

        node.layer = Some(layer_id.clone());

        let layer = layers.entry(layer_id.clone()).or_insert_with(|| {
            order.push(layer_id.clone());
            Layer {
                name: rules::title_case(&layer_id),
                color: resolve_color(&layer_id, config, &rule_colors),
                id: layer_id,
                modules: Vec::new(),
                level,
            }
        });
        layer.modules.push(node.path.clone());
    }

    // Member order: centrality descending, path ascending on ties.
    let degree_of: FxHashMap<&str, u32> = graph
        .nodes
        .values()
        .map(|n| (n.path.as_str(), n.total_degree()))
        .collect();
    for layer in layers.values_mut() {
        layer
            .modules
            .sort_by(|a, b| {
                let da = degree_of.get(a.as_str()).copied().unwrap_or(0);
                let db = degree_of.get(b.as_str()).copied().unwrap_or(0);
                db.cmp(&da).then_with(|| a.cmp(b))
            });
    }

    let mut result: Vec<Layer> = order
        .into_iter()
        .filter_map(|id| layers.remove(&id))
        .collect();
    result.sort_by(|a, b| a.level.cmp(&b.level).then_with(|| a.id.cmp(&b.id)));
    result
}

/// No rule matched: the first path segment names the layer, or `root`
/// for files directly under the project root.
fn fallback_layer(normalized_path: &str) -> String {
    match normalized_path.split_once('/') {
        Some((first, _)) => first.to_string(),
        None => "root".to_string(),
    }
}

fn resolve_color(
    layer_id: &str,
    config: &ProjectConfig,
    rule_colors: &FxHashMap<String, String>,
) -> String {
    if let Some(color) = config.styles.get(layer_id) {
        return color.clone();
    }
    if let Some(color) = rule_colors.get(layer_id) {
        return color.clone();
    }
    palette::default_color(layer_id).to_string()
}
