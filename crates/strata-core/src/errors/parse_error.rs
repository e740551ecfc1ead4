//! Parser-subsystem errors.
//!
//! Per-file parse failures are not errors: they are collected as strings in
//! the parsed file's `errors` list and the pipeline continues. This enum is
//! for conditions that make the parser subsystem itself unusable.

/// Fatal parser-subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("no parser registered for any configured extension")]
    EmptyRegistry,

    #[error("failed to load {language} grammar: {message}")]
    Grammar { language: String, message: String },

    #[error("failed to compile {language} query: {message}")]
    Query { language: String, message: String },
}
