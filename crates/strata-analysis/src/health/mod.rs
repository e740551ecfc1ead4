//! Health summary — dependency hygiene metrics and grading.
//!
//! The score starts at 100 and accumulates penalties for cycles, heavy
//! coupling, orphan ratio, layer violations, hub modules, and global
//! instability extremes. Grades and status bands are fixed thresholds.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::graph::{high_coupling_modules, orphan_modules, DependencyGraph};
use crate::layers::Layer;

/// Traffic-light status derived from the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Warning,
    Critical,
}

/// Aggregate health metrics for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSummary {
    /// Mean normalized coupling, rounded to two decimals.
    pub average_coupling: f64,
    pub circular_dependency_count: usize,
    /// Edges pointing against the inferred layer hierarchy.
    pub layer_violations: usize,
    pub max_in_degree: u32,
    pub max_out_degree: u32,
    pub orphan_count: usize,
    pub entry_points_count: usize,
    /// Modules with normalized coupling above 0.7, path order.
    pub high_coupling_modules: Vec<String>,
    /// Non-entry-point modules nothing imports, path order.
    pub orphan_modules: Vec<String>,
    /// 0–100.
    pub score: u32,
    /// A ≥90, B ≥80, C ≥70, D ≥60, else F.
    pub grade: char,
    pub status: HealthStatus,
}

/// Compute the summary from the final graph and inferred layers.
pub fn compute(graph: &DependencyGraph, layers: &[Layer]) -> HealthSummary {
    let node_count = graph.nodes.len();

    let average_coupling = if node_count == 0 {
        0.0
    } else {
        let sum: f64 = graph.nodes.values().map(|n| n.coupling).sum();
        round2(sum / node_count as f64)
    };

    let max_in_degree = graph.nodes.values().map(|n| n.in_degree).max().unwrap_or(0);
    let max_out_degree = graph
        .nodes
        .values()
        .map(|n| n.out_degree)
        .max()
        .unwrap_or(0);

    let orphans = orphan_modules(graph.nodes.values());
    let high_coupling = high_coupling_modules(graph.nodes.values());
    let entry_points_count = graph.nodes.values().filter(|n| n.is_entry_point).count();
    let layer_violations = count_layer_violations(graph, layers);

    let score = score(graph, layers, &orphans, layer_violations);

    HealthSummary {
        average_coupling,
        circular_dependency_count: graph.cycles.len(),
        layer_violations,
        max_in_degree,
        max_out_degree,
        orphan_count: orphans.len(),
        entry_points_count,
        high_coupling_modules: high_coupling,
        orphan_modules: orphans,
        score,
        grade: grade(score),
        status: status(score),
    }
}

/// Edges whose source layer sits strictly below its target layer.
fn count_layer_violations(graph: &DependencyGraph, layers: &[Layer]) -> usize {
    let level_of: FxHashMap<&str, i32> =
        layers.iter().map(|l| (l.id.as_str(), l.level)).collect();

    graph
        .edges
        .iter()
        .filter(|edge| {
            let src_layer = graph.nodes.get(&edge.source).and_then(|n| n.layer.as_deref());
            let dst_layer = graph.nodes.get(&edge.target).and_then(|n| n.layer.as_deref());
            match (src_layer, dst_layer) {
                (Some(s), Some(t)) => match (level_of.get(s), level_of.get(t)) {
                    (Some(ls), Some(lt)) => ls > lt,
                    _ => false,
                },
                _ => false,
            }
        })
        .count()
}

fn score(
    graph: &DependencyGraph,
    _layers: &[Layer],
    orphans: &[String],
    layer_violations: usize,
) -> u32 {
    let mut score: i32 = 100;
    let node_count = graph.nodes.len();

    // Cycles: −3 each, capped at −30.
    score -= (graph.cycles.len() as i32 * 3).min(30);

    // Mean total degree tiers (cumulative).
    let mean_degree = if node_count == 0 {
        0.0
    } else {
        graph
            .nodes
            .values()
            .map(|n| f64::from(n.total_degree()))
            .sum::<f64>()
            / node_count as f64
    };
    if mean_degree > 5.0 {
        score -= 5;
    }
    if mean_degree > 10.0 {
        score -= 10;
    }
    if mean_degree > 20.0 {
        score -= 5;
    }

    // Orphan ratio tiers (cumulative).
    let orphan_ratio = if node_count == 0 {
        0.0
    } else {
        orphans.len() as f64 / node_count as f64
    };
    if orphan_ratio > 0.1 {
        score -= 5;
    }
    if orphan_ratio > 0.3 {
        score -= 10;
    }
    if orphan_ratio > 0.5 {
        score -= 15;
    }

    // Layer violations: −1 each, capped at −15.
    score -= (layer_violations as i32).min(15);

    // Heavy hubs.
    let max_in = graph.nodes.values().map(|n| n.in_degree).max().unwrap_or(0);
    let max_out = graph
        .nodes
        .values()
        .map(|n| n.out_degree)
        .max()
        .unwrap_or(0);
    if max_in > 50 {
        score -= 5;
    }
    if max_out > 50 {
        score -= 5;
    }

    // Modules acting as hubs in both directions.
    let hub_count = graph
        .nodes
        .values()
        .filter(|n| n.in_degree >= 5 && n.out_degree >= 5)
        .count();
    if hub_count > 3 {
        score -= 5;
    } else if hub_count > 0 {
        score -= 2;
    }

    // Mean instability Ce/(Ca+Ce) pushed to either extreme.
    let instabilities: Vec<f64> = graph
        .nodes
        .values()
        .filter(|n| n.total_degree() > 0)
        .map(|n| f64::from(n.out_degree) / f64::from(n.total_degree()))
        .collect();
    if !instabilities.is_empty() {
        let mean = instabilities.iter().sum::<f64>() / instabilities.len() as f64;
        if !(0.1..=0.9).contains(&mean) {
            score -= 3;
        }
    }

    score.clamp(0, 100) as u32
}

fn grade(score: u32) -> char {
    match score {
        90..=100 => 'A',
        80..=89 => 'B',
        70..=79 => 'C',
        60..=69 => 'D',
        _ => 'F',
    }
}

fn status(score: u32) -> HealthStatus {
    if score >= 70 {
        HealthStatus::Healthy
    } else if score >= 50 {
        HealthStatus::Warning
    } else {
        HealthStatus::Critical
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
