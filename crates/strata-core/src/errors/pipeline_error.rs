//! Pipeline errors.

use super::{ConfigError, ParseError, ScanError};

/// Errors that abort an analysis run.
/// Aggregates subsystem errors via `From` conversions.
///
/// Per-file parse failures and unresolved imports are never represented
/// here; they are collected into the analysis result instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}
