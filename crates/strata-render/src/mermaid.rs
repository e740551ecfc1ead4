//! Mermaid flowchart emitter.
//!
//! One `subgraph` per layer, `A --> B` edges. Node ids are sanitized to
//! `[A-Za-z0-9_]` with a leading underscore when they would start with a
//! digit.

use std::fmt::Write;

use strata_analysis::{AnalysisResult, LayoutPlan};

use crate::{Emitter, RenderError};

#[derive(Debug)]
pub struct MermaidEmitter;

impl Emitter for MermaidEmitter {
    fn name(&self) -> &'static str {
        "mermaid"
    }

    fn extension(&self) -> &'static str {
        "mmd"
    }

    fn emit(&self, result: &AnalysisResult, _layout: &LayoutPlan) -> Result<String, RenderError> {
        let mut out = String::with_capacity(4 * 1024);
        writeln!(out, "flowchart TB").ok();

        for layer in &result.layers {
            let subgraph_id = sanitize_id(&format!("layer_{}", layer.id));
            writeln!(out, "  subgraph {subgraph_id}[\"{}\"]", quote_label(&layer.name)).ok();
            for module in &layer.modules {
                let label = result
                    .graph
                    .nodes
                    .get(module)
                    .map(|n| n.name.as_str())
                    .unwrap_or(module.as_str());
                writeln!(
                    out,
                    "    {}[\"{}\"]",
                    sanitize_id(module),
                    quote_label(label)
                )
                .ok();
            }
            writeln!(out, "  end").ok();
            writeln!(
                out,
                "  style {subgraph_id} fill:{},stroke:{}",
                lighten_for_mermaid(&layer.color),
                layer.color
            )
            .ok();
        }

        if !result.graph.edges.is_empty() {
            writeln!(out).ok();
            for edge in &result.graph.edges {
                writeln!(
                    out,
                    "  {} --> {}",
                    sanitize_id(&edge.source),
                    sanitize_id(&edge.target)
                )
                .ok();
            }
        }

        Ok(out)
    }
}

/// Restrict an id to `[A-Za-z0-9_]`, prefixing `_` when the first
/// character is a digit.
fn sanitize_id(raw: &str) -> String {
    let mut id: String = raw
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if id.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        id.insert(0, '_');
    }
    id
}

/// Double quotes inside a bracket label would terminate it early.
fn quote_label(label: &str) -> String {
    label.replace('"', "'")
}

fn lighten_for_mermaid(color: &str) -> String {
    strata_analysis::layout::lighten(color, 45.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitization() {
        assert_eq!(sanitize_id("src/app.ts"), "src_app_ts");
        assert_eq!(sanitize_id("3rd-party"), "_3rd_party");
        assert_eq!(sanitize_id("plain_id"), "plain_id");
    }
}
