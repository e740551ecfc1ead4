//! Layout output types.

use serde::{Deserialize, Serialize};

/// Planner options.
#[derive(Debug, Clone, Copy, Default)]
pub struct LayoutOptions {
    /// Run the barycenter crossing-minimization pass over layer members.
    pub minimize_crossings: bool,
}

/// A positioned rectangle: either a layer group or a module box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutNode {
    /// Stable id: `layer-<id>` for groups, the module path otherwise.
    pub id: String,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill_color: String,
    pub stroke_color: String,
    pub font_color: String,
    /// Containing group id for module boxes.
    pub parent: Option<String>,
    pub is_group: bool,
    /// Module path pass-through for emitters that need source metadata.
    pub module: Option<String>,
}

/// A routed dependency edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutEdge {
    /// Sequential `edge-N` id.
    pub id: String,
    /// Source module path.
    pub source: String,
    /// Target module path.
    pub target: String,
    pub weight: u32,
    /// 1 + log2(weight), clamped to [1, 3].
    pub stroke_width: f64,
}

/// The complete layout for one analysis result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutPlan {
    pub nodes: Vec<LayoutNode>,
    pub edges: Vec<LayoutEdge>,
    pub width: f64,
    pub height: f64,
}
