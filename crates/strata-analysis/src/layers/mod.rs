//! Layer classification and hierarchy inference.
//!
//! Modules are assigned to layers by ordered pattern rules — user
//! grouping rules first, then built-in heuristics — and the layer levels
//! are then re-ordered by observed dependency direction so the most
//! depended-upon layers sink to the bottom of the diagram.

mod classifier;
mod hierarchy;
mod palette;
mod rules;

pub use classifier::classify;
pub use hierarchy::infer_hierarchy;
pub use palette::{default_color, FALLBACK_COLOR};
pub use rules::LayerRule;

use serde::{Deserialize, Serialize};

/// A named horizontal band of modules in the architecture diagram.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Layer {
    /// Lowercase slug; unique across the result.
    pub id: String,
    /// Title-cased display name.
    pub name: String,
    /// Member module paths, ordered by centrality (descending), ties by
    /// ascending path.
    pub modules: Vec<String>,
    /// `#RRGGBB` fill color.
    pub color: String,
    /// Vertical position; 0 is the topmost band.
    pub level: i32,
}
