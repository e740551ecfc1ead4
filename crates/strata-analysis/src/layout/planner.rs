//! Grid placement of layers and modules.

use crate::graph::DependencyGraph;
use crate::layers::Layer;

use super::color::{darken, lighten};
use super::crossing::minimize_crossings;
use super::types::{LayoutEdge, LayoutNode, LayoutOptions, LayoutPlan};

const NODE_WIDTH: f64 = 160.0;
const NODE_HEIGHT: f64 = 50.0;
const HORIZONTAL_GAP: f64 = 30.0;
const VERTICAL_GAP: f64 = 25.0;
const LAYER_GAP: f64 = 60.0;
const LAYER_HEADER: f64 = 30.0;
const LAYER_PADDING: f64 = 20.0;
const CANVAS_PADDING: f64 = 40.0;
const MAX_COLUMNS: usize = 6;

const GROUP_FONT: &str = "#333333";
const MODULE_FONT: &str = "#ffffff";
const LIGHTEN_GROUP_FILL: f64 = 90.0;
const DARKEN_MODULE_STROKE: f64 = 20.0;

/// Produce the layout for the given layers (ascending level) and graph.
pub fn plan(graph: &DependencyGraph, layers: &[Layer], options: LayoutOptions) -> LayoutPlan {
    let mut member_lists: Vec<Vec<String>> =
        layers.iter().map(|l| l.modules.clone()).collect();

    if options.minimize_crossings {
        let edge_pairs: Vec<(String, String)> = graph
            .edges
            .iter()
            .map(|e| (e.source.clone(), e.target.clone()))
            .collect();
        minimize_crossings(&mut member_lists, &edge_pairs);
    }

    let mut nodes = Vec::new();
    let mut running_y = CANVAS_PADDING;
    let mut max_layer_width: f64 = 0.0;

    for (layer, members) in layers.iter().zip(&member_lists) {
        if members.is_empty() {
            continue;
        }

        let columns = members.len().min(MAX_COLUMNS);
        let rows = members.len().div_ceil(columns);

        let inner_width = columns as f64 * NODE_WIDTH + (columns as f64 - 1.0) * HORIZONTAL_GAP;
        let layer_width = inner_width + 2.0 * LAYER_PADDING;
        let layer_height = LAYER_HEADER
            + 2.0 * LAYER_PADDING
            + rows as f64 * NODE_HEIGHT
            + (rows as f64 - 1.0) * VERTICAL_GAP;
        max_layer_width = max_layer_width.max(layer_width);

        let layer_x = CANVAS_PADDING;
        let layer_y = running_y;
        let group_id = format!("layer-{}", layer.id);

        nodes.push(LayoutNode {
            id: group_id.clone(),
            label: layer.name.clone(),
            x: layer_x,
            y: layer_y,
            width: layer_width,
            height: layer_height,
            fill_color: lighten(&layer.color, LIGHTEN_GROUP_FILL),
            stroke_color: layer.color.clone(),
            font_color: GROUP_FONT.to_string(),
            parent: None,
            is_group: true,
            module: None,
        });

        for (i, path) in members.iter().enumerate() {
            let row = i / columns;
            let column = i % columns;
            let x = layer_x + LAYER_PADDING + column as f64 * (NODE_WIDTH + HORIZONTAL_GAP);
            let y = layer_y
                + LAYER_HEADER
                + LAYER_PADDING
                + row as f64 * (NODE_HEIGHT + VERTICAL_GAP);

            let label = graph
                .nodes
                .get(path)
                .map(|n| n.name.clone())
                .unwrap_or_else(|| path.clone());

            nodes.push(LayoutNode {
                id: path.clone(),
                label,
                x,
                y,
                width: NODE_WIDTH,
                height: NODE_HEIGHT,
                fill_color: layer.color.clone(),
                stroke_color: darken(&layer.color, DARKEN_MODULE_STROKE),
                font_color: MODULE_FONT.to_string(),
                parent: Some(group_id.clone()),
                is_group: false,
                module: Some(path.clone()),
            });
        }

        running_y += layer_height + LAYER_GAP;
    }

    // Align every layer band to the widest one.
    for node in nodes.iter_mut().filter(|n| n.is_group) {
        node.width = max_layer_width;
    }

    let height = if nodes.is_empty() {
        2.0 * CANVAS_PADDING
    } else {
        running_y - LAYER_GAP + CANVAS_PADDING
    };
    let width = max_layer_width + 2.0 * CANVAS_PADDING;

    let placed: std::collections::BTreeSet<&str> = nodes
        .iter()
        .filter(|n| !n.is_group)
        .map(|n| n.id.as_str())
        .collect();

    let edges = graph
        .edges
        .iter()
        .filter(|e| placed.contains(e.source.as_str()) && placed.contains(e.target.as_str()))
        .enumerate()
        .map(|(i, e)| LayoutEdge {
            id: format!("edge-{}", i + 1),
            source: e.source.clone(),
            target: e.target.clone(),
            weight: e.weight,
            stroke_width: (1.0 + f64::from(e.weight).log2()).clamp(1.0, 3.0),
        })
        .collect();

    LayoutPlan {
        nodes,
        edges,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{ModuleEdge, ModuleNode};
    use crate::scanner::Language;
    use std::collections::{BTreeMap, BTreeSet};

    fn graph_and_layers(counts: &[(&str, usize)]) -> (DependencyGraph, Vec<Layer>) {
        let mut nodes = BTreeMap::new();
        let mut layers = Vec::new();
        for (level, (id, count)) in counts.iter().enumerate() {
            let mut modules = Vec::new();
            for i in 0..*count {
                let path = format!("{id}/m{i}.ts");
                modules.push(path.clone());
                nodes.insert(
                    path.clone(),
                    ModuleNode {
                        path,
                        name: format!("m{i}"),
                        language: Language::TypeScript,
                        is_entry_point: false,
                        in_degree: 0,
                        out_degree: 0,
                        coupling: 0.0,
                        layer: Some(id.to_string()),
                    },
                );
            }
            layers.push(Layer {
                id: id.to_string(),
                name: id.to_string(),
                modules,
                color: "#3498db".to_string(),
                level: level as i32,
            });
        }
        (
            DependencyGraph {
                nodes,
                ..Default::default()
            },
            layers,
        )
    }

    #[test]
    fn grid_wraps_at_six_columns() {
        let (graph, layers) = graph_and_layers(&[("api", 8)]);
        let plan = plan(&graph, &layers, LayoutOptions::default());

        let modules: Vec<&LayoutNode> = plan.nodes.iter().filter(|n| !n.is_group).collect();
        assert_eq!(modules.len(), 8);

        // Row 0 has six nodes, row 1 has two.
        let first_row_y = modules[0].y;
        assert_eq!(modules.iter().filter(|m| m.y == first_row_y).count(), 6);
        assert!(modules[6].y > first_row_y);
        assert_eq!(modules[6].x, modules[0].x);
    }

    #[test]
    fn layers_stack_with_gap_and_align_widths() {
        let (graph, layers) = graph_and_layers(&[("api", 2), ("db", 6)]);
        let plan = plan(&graph, &layers, LayoutOptions::default());

        let groups: Vec<&LayoutNode> = plan.nodes.iter().filter(|n| n.is_group).collect();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].width, groups[1].width);
        let expected_second_y = groups[0].y + groups[0].height + LAYER_GAP;
        assert_eq!(groups[1].y, expected_second_y);
        assert_eq!(plan.width, groups[0].width + 2.0 * CANVAS_PADDING);
    }

    #[test]
    fn deterministic_positions() {
        let (graph, layers) = graph_and_layers(&[("api", 3), ("db", 2)]);
        let a = plan(&graph, &layers, LayoutOptions::default());
        let b = plan(&graph, &layers, LayoutOptions::default());
        let xa: Vec<(String, f64, f64)> =
            a.nodes.iter().map(|n| (n.id.clone(), n.x, n.y)).collect();
        let xb: Vec<(String, f64, f64)> =
            b.nodes.iter().map(|n| (n.id.clone(), n.x, n.y)).collect();
        assert_eq!(xa, xb);
    }

    #[test]
    fn edge_stroke_width_is_log_scaled() {
        let (mut graph, layers) = graph_and_layers(&[("api", 2)]);
        graph.edges.push(ModuleEdge {
            source: "api/m0.ts".to_string(),
            target: "api/m1.ts".to_string(),
            weight: 4,
            kinds: BTreeSet::new(),
        });
        let plan = plan(&graph, &layers, LayoutOptions::default());

        assert_eq!(plan.edges.len(), 1);
        assert_eq!(plan.edges[0].id, "edge-1");
        assert_eq!(plan.edges[0].stroke_width, 3.0);
    }

    #[test]
    fn group_colors_are_derived() {
        let (graph, layers) = graph_and_layers(&[("api", 1)]);
        let plan = plan(&graph, &layers, LayoutOptions::default());
        let group = plan.nodes.iter().find(|n| n.is_group).unwrap();
        assert_eq!(group.stroke_color, "#3498db");
        // Lightened toward white.
        assert_eq!(group.fill_color, "#ffffff");
        let module = plan.nodes.iter().find(|n| !n.is_group).unwrap();
        assert_eq!(module.fill_color, "#3498db");
        assert_eq!(module.stroke_color, "#0165a8");
    }
}
