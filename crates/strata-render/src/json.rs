//! Canonical JSON emitter.

use strata_analysis::{AnalysisResult, LayoutPlan};

use crate::{Emitter, RenderError};

#[derive(Debug)]
pub struct JsonEmitter;

impl Emitter for JsonEmitter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }

    fn emit(&self, result: &AnalysisResult, _layout: &LayoutPlan) -> Result<String, RenderError> {
        Ok(result.canonical_json()?)
    }
}
