//! `AnalysisResult` — the final output of the engine.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::graph::DependencyGraph;
use crate::health::HealthSummary;
use crate::layers::Layer;

/// Everything one analysis run produced. Owns the graph and the layer
/// list; emitters and hosts consume this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Absolute project root that was analyzed.
    pub project_root: String,
    /// Wall-clock completion time.
    pub generated_at: DateTime<Utc>,
    pub total_files: usize,
    pub total_edges: usize,
    pub graph: DependencyGraph,
    /// Ascending by level.
    pub layers: Vec<Layer>,
    pub health: HealthSummary,
    /// Per-file parse problems, keyed by relative path. Files listed here
    /// still appear as nodes; extraction was best-effort.
    pub parse_errors: BTreeMap<String, Vec<String>>,
}

/// Timestamp-free borrow of a result, used for canonical serialization.
#[derive(Serialize)]
struct CanonicalView<'a> {
    project_root: &'a str,
    total_files: usize,
    total_edges: usize,
    graph: &'a DependencyGraph,
    layers: &'a [Layer],
    health: &'a HealthSummary,
    parse_errors: &'a BTreeMap<String, Vec<String>>,
}

impl AnalysisResult {
    /// Canonical serialization: maps in key order, edges sorted by
    /// (source, target), cycles as discovered, no timestamp. Two runs
    /// over the same inputs produce byte-identical output.
    pub fn canonical_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&CanonicalView {
            project_root: &self.project_root,
            total_files: self.total_files,
            total_edges: self.total_edges,
            graph: &self.graph,
            layers: &self.layers,
            health: &self.health,
            parse_errors: &self.parse_errors,
        })
    }
}
