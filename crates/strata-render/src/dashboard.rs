//! HTML dashboard emitter.
//!
//! A single self-contained file with inline CSS and no external
//! dependencies: health score, grade badge, layer table, cycle list.

use std::fmt::Write;

use strata_analysis::{AnalysisResult, HealthStatus, LayoutPlan};

use crate::{Emitter, RenderError};

#[derive(Debug)]
pub struct DashboardEmitter;

impl DashboardEmitter {
    fn escape_html(s: &str) -> String {
        s.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    fn status_class(status: HealthStatus) -> &'static str {
        match status {
            HealthStatus::Healthy => "status-healthy",
            HealthStatus::Warning => "status-warning",
            HealthStatus::Critical => "status-critical",
        }
    }
}

impl Emitter for DashboardEmitter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extension(&self) -> &'static str {
        "html"
    }

    fn emit(&self, result: &AnalysisResult, _layout: &LayoutPlan) -> Result<String, RenderError> {
        let health = &result.health;
        let mut html = String::with_capacity(8192);

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        write!(
            html,
            "<title>Architecture Health — {}</title>\n",
            Self::escape_html(&result.project_root)
        )
        .ok();
        html.push_str(
            "<style>\n\
             body { font-family: -apple-system, 'Segoe UI', sans-serif; margin: 2rem; color: #2c3e50; }\n\
             h1 { font-size: 1.4rem; }\n\
             .cards { display: flex; gap: 1rem; flex-wrap: wrap; margin: 1.5rem 0; }\n\
             .card { border: 1px solid #dfe4ea; border-radius: 8px; padding: 1rem 1.5rem; min-width: 8rem; }\n\
             .card .value { font-size: 1.8rem; font-weight: 700; }\n\
             .card .label { color: #7f8c8d; font-size: 0.8rem; text-transform: uppercase; }\n\
             .grade { font-size: 2.4rem; font-weight: 800; }\n\
             .status-healthy { color: #27ae60; }\n\
             .status-warning { color: #f39c12; }\n\
             .status-critical { color: #e74c3c; }\n\
             table { border-collapse: collapse; width: 100%; margin-top: 1rem; }\n\
             th, td { text-align: left; padding: 0.4rem 0.8rem; border-bottom: 1px solid #ecf0f1; }\n\
             .swatch { display: inline-block; width: 0.8rem; height: 0.8rem; border-radius: 3px; margin-right: 0.4rem; vertical-align: middle; }\n\
             code { background: #f6f8fa; padding: 0.1rem 0.3rem; border-radius: 3px; }\n\
             </style>\n</head>\n<body>\n",
        );

        write!(
            html,
            "<h1>Architecture Health — <code>{}</code></h1>\n",
            Self::escape_html(&result.project_root)
        )
        .ok();

        // Summary cards.
        html.push_str("<div class=\"cards\">\n");
        write!(
            html,
            "<div class=\"card\"><div class=\"grade {}\">{}</div><div class=\"label\">Grade ({}/100)</div></div>\n",
            Self::status_class(health.status),
            health.grade,
            health.score
        )
        .ok();
        for (value, label) in [
            (result.total_files.to_string(), "Modules"),
            (result.total_edges.to_string(), "Dependencies"),
            (
                health.circular_dependency_count.to_string(),
                "Cycles",
            ),
            (health.layer_violations.to_string(), "Layer violations"),
            (health.orphan_count.to_string(), "Orphans"),
            (format!("{:.2}", health.average_coupling), "Avg coupling"),
        ] {
            write!(
                html,
                "<div class=\"card\"><div class=\"value\">{value}</div><div class=\"label\">{label}</div></div>\n"
            )
            .ok();
        }
        html.push_str("</div>\n");

        // Layer table.
        html.push_str("<h2>Layers</h2>\n<table>\n<tr><th>Layer</th><th>Level</th><th>Modules</th></tr>\n");
        for layer in &result.layers {
            write!(
                html,
                "<tr><td><span class=\"swatch\" style=\"background:{}\"></span>{}</td><td>{}</td><td>{}</td></tr>\n",
                Self::escape_html(&layer.color),
                Self::escape_html(&layer.name),
                layer.level,
                layer.modules.len()
            )
            .ok();
        }
        html.push_str("</table>\n");

        // Cycles.
        if !result.graph.cycles.is_empty() {
            html.push_str("<h2>Circular dependencies</h2>\n<ul>\n");
            for cycle in &result.graph.cycles {
                let chain = cycle
                    .iter()
                    .map(|p| Self::escape_html(p))
                    .collect::<Vec<_>>()
                    .join(" &rarr; ");
                write!(html, "<li><code>{chain}</code></li>\n").ok();
            }
            html.push_str("</ul>\n");
        }

        // Hotspots.
        if !health.high_coupling_modules.is_empty() {
            html.push_str("<h2>Highly coupled modules</h2>\n<ul>\n");
            for module in &health.high_coupling_modules {
                write!(html, "<li><code>{}</code></li>\n", Self::escape_html(module)).ok();
            }
            html.push_str("</ul>\n");
        }

        html.push_str("</body>\n</html>\n");
        Ok(html)
    }
}
