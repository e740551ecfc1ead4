//! Dependency graph construction and analysis.
//!
//! Two passes over the parsed files: node creation, then import
//! resolution against a lookup table of every known file. Derived
//! computations (degrees, coupling, cycles) run on the completed graph.
//!
//! Internally the builder works on dense integer node ids (a petgraph
//! `DiGraph` plus an interning map); the public `DependencyGraph` view
//! iterates in sorted key order regardless of build order.

mod builder;
mod cycles;
mod metrics;
mod resolver;
mod types;

pub use builder::GraphBuilder;
pub use metrics::{high_coupling_modules, orphan_modules, HIGH_COUPLING_THRESHOLD};
pub use types::{DependencyGraph, ModuleEdge, ModuleNode, ENTRY_POINT_STEMS};
