//! Layout planner — deterministic node/edge geometry.
//!
//! Layers stack vertically in level order; members fill a grid inside
//! each layer, ordered by centrality. The output is pure geometry plus
//! colors, consumed by any downstream emitter.

mod color;
mod crossing;
mod planner;
mod types;

pub use color::{darken, lighten};
pub use crossing::minimize_crossings;
pub use planner::plan;
pub use types::{LayoutEdge, LayoutNode, LayoutOptions, LayoutPlan};
