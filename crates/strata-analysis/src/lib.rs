//! strata-analysis: the static-analysis engine.
//!
//! A five-stage batch pipeline, leaves-first:
//! 1. Scanner — file discovery with extension and ignore filtering
//! 2. Parsers — per-language import/export extraction
//! 3. Graph builder — import resolution, cycles, coupling metrics
//! 4. Layer classifier — pattern rules plus dependency-direction hierarchy
//! 5. Layout planner — deterministic node/edge geometry for the emitters
//!
//! Control flow is strictly forward; every stage is a deterministic
//! function of the previous stage's output. Entry point: [`pipeline::analyze`].

pub mod graph;
pub mod health;
pub mod layers;
pub mod layout;
pub mod parsers;
pub mod pipeline;
pub mod result;
pub mod scanner;

pub use graph::{DependencyGraph, ModuleEdge, ModuleNode};
pub use health::{HealthStatus, HealthSummary};
pub use layers::Layer;
pub use layout::{LayoutEdge, LayoutNode, LayoutOptions, LayoutPlan};
pub use parsers::{ImportKind, ImportRecord, ParsedFile};
pub use pipeline::analyze;
pub use result::AnalysisResult;
pub use scanner::{Language, Scanner, SourceFile};
