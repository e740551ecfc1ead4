//! strata-render: emitters consuming `AnalysisResult` + `LayoutPlan`.
//!
//! 4 output formats: draw.io mxGraph XML, Mermaid flowchart, a
//! self-contained HTML dashboard, and canonical JSON. A small diff cache
//! compares normalized XML against the previous run.

pub mod dashboard;
pub mod diff;
pub mod drawio;
pub mod json;
pub mod mermaid;
mod xml;

use strata_analysis::{AnalysisResult, LayoutPlan};

/// Errors raised while emitting or caching output.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unknown output format: {format}")]
    UnknownFormat { format: String },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("cache I/O failed: {0}")]
    Cache(#[from] std::io::Error),
}

/// Trait for output generation.
pub trait Emitter: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// File extension for the emitted artifact, without the dot.
    fn extension(&self) -> &'static str;

    fn emit(&self, result: &AnalysisResult, layout: &LayoutPlan) -> Result<String, RenderError>;
}

/// Create an emitter by format name.
pub fn create_emitter(format: &str) -> Result<Box<dyn Emitter>, RenderError> {
    match format {
        "drawio" => Ok(Box::new(drawio::DrawioEmitter)),
        "mermaid" => Ok(Box::new(mermaid::MermaidEmitter)),
        "html" => Ok(Box::new(dashboard::DashboardEmitter)),
        "json" => Ok(Box::new(json::JsonEmitter)),
        _ => Err(RenderError::UnknownFormat {
            format: format.to_string(),
        }),
    }
}

/// All available format names.
pub fn available_formats() -> &'static [&'static str] {
    &["drawio", "mermaid", "html", "json"]
}
