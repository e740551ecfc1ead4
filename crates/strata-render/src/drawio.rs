//! draw.io (mxGraph) XML emitter.
//!
//! Layers become `swimlane` cells, modules rounded rectangles parented
//! into their swimlane, edges orthogonal routes. Child geometry is
//! relative to the parent swimlane, so absolute layout positions are
//! rebased before writing.

use std::fmt::Write;

use rustc_hash::FxHashMap;
use strata_analysis::{AnalysisResult, LayoutPlan};

use crate::xml::escape;
use crate::{Emitter, RenderError};

#[derive(Debug)]
pub struct DrawioEmitter;

impl Emitter for DrawioEmitter {
    fn name(&self) -> &'static str {
        "drawio"
    }

    fn extension(&self) -> &'static str {
        "drawio"
    }

    fn emit(&self, result: &AnalysisResult, layout: &LayoutPlan) -> Result<String, RenderError> {
        let mut xml = String::with_capacity(16 * 1024);

        writeln!(xml, r#"<?xml version="1.0" encoding="UTF-8"?>"#).ok();
        writeln!(
            xml,
            r#"<mxfile host="strata" modified="{}" agent="strata">"#,
            escape(&result.generated_at.to_rfc3339())
        )
        .ok();
        writeln!(xml, r#"  <diagram id="architecture" name="Architecture">"#).ok();
        writeln!(
            xml,
            r#"    <mxGraphModel dx="800" dy="600" grid="0" gridSize="10" guides="1" tooltips="1" connect="1" arrows="1" fold="1" page="1" pageScale="1" pageWidth="{:.0}" pageHeight="{:.0}" math="0" shadow="0">"#,
            layout.width, layout.height
        )
        .ok();
        writeln!(xml, r#"      <root>"#).ok();
        writeln!(xml, r#"        <mxCell id="0" />"#).ok();
        writeln!(xml, r#"        <mxCell id="1" parent="0" />"#).ok();

        // Parent origins for rebasing child coordinates.
        let origins: FxHashMap<&str, (f64, f64)> = layout
            .nodes
            .iter()
            .filter(|n| n.is_group)
            .map(|n| (n.id.as_str(), (n.x, n.y)))
            .collect();

        for node in &layout.nodes {
            let (style, parent, x, y) = if node.is_group {
                (
                    format!(
                        "swimlane;horizontal=1;startSize=30;rounded=1;fillColor={};strokeColor={};fontColor={};fontSize=14;fontStyle=1",
                        node.fill_color, node.stroke_color, node.font_color
                    ),
                    "1".to_string(),
                    node.x,
                    node.y,
                )
            } else {
                let parent = node.parent.clone().unwrap_or_else(|| "1".to_string());
                let (ox, oy) = origins
                    .get(parent.as_str())
                    .copied()
                    .unwrap_or((0.0, 0.0));
                (
                    format!(
                        "rounded=1;whiteSpace=wrap;html=1;fillColor={};strokeColor={};fontColor={};fontSize=12",
                        node.fill_color, node.stroke_color, node.font_color
                    ),
                    parent,
                    node.x - ox,
                    node.y - oy,
                )
            };

            writeln!(
                xml,
                r#"        <mxCell id="{}" value="{}" style="{}" vertex="1" parent="{}">"#,
                escape(&node.id),
                escape(&node.label),
                escape(&style),
                escape(&parent)
            )
            .ok();
            writeln!(
                xml,
                r#"          <mxGeometry x="{x:.0}" y="{y:.0}" width="{:.0}" height="{:.0}" as="geometry" />"#,
                node.width, node.height
            )
            .ok();
            writeln!(xml, r#"        </mxCell>"#).ok();
        }

        for edge in &layout.edges {
            writeln!(
                xml,
                r#"        <mxCell id="{}" style="edgeStyle=orthogonalEdgeStyle;rounded=1;curved=1;strokeWidth={:.1};strokeColor=#7f8c8d;endArrow=blockThin" edge="1" parent="1" source="{}" target="{}">"#,
                escape(&edge.id),
                edge.stroke_width,
                escape(&edge.source),
                escape(&edge.target)
            )
            .ok();
            writeln!(
                xml,
                r#"          <mxGeometry relative="1" as="geometry" />"#
            )
            .ok();
            writeln!(xml, r#"        </mxCell>"#).ok();
        }

        writeln!(xml, r#"      </root>"#).ok();
        writeln!(xml, r#"    </mxGraphModel>"#).ok();
        writeln!(xml, r#"  </diagram>"#).ok();
        writeln!(xml, r#"</mxfile>"#).ok();

        Ok(xml)
    }
}
