//! `LanguageParser` trait — the contract every language parser implements.

use std::path::Path;

use crate::scanner::{Language, SourceFile};

use super::types::ParsedFile;

/// Trait that every language parser must implement.
///
/// `parse` must never panic or error on malformed input; problems are
/// recorded in the returned `ParsedFile::errors` and extraction reports
/// whatever was recovered.
pub trait LanguageParser: Send + Sync + std::fmt::Debug {
    /// The language this parser handles.
    fn language(&self) -> Language;

    /// File extensions this parser handles, lowercase, without the dot.
    fn extensions(&self) -> &[&str];

    /// True when this parser handles the given path, by extension.
    fn can_parse(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.extensions().contains(&e.as_str()))
    }

    /// Parse source text into a `ParsedFile`.
    fn parse(&self, source: &str, file: &SourceFile) -> ParsedFile;
}
