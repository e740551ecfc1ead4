//! Canonical parse output types.
//!
//! `ParsedFile` is the single source of truth for parse output; the graph
//! builder and everything downstream consume this struct.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::scanner::SourceFile;

/// How an import was written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    Es6Default,
    Es6Named,
    Es6Namespace,
    Commonjs,
    Dynamic,
    ReExport,
    PythonImport,
    PythonFrom,
    GoImport,
    JavaImport,
}

/// One import relation extracted from a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportRecord {
    /// The raw module specifier as written in the source.
    pub source: String,
    /// Syntactic form of the import.
    pub kind: ImportKind,
    /// Imported names, where the form carries any.
    pub names: SmallVec<[String; 4]>,
    /// True when the specifier starts with `.` or `/` (per-language rule).
    pub is_relative: bool,
    /// True when the specifier points outside the project (per-language rule).
    pub is_external: bool,
    /// 1-based line of the import statement.
    pub line: u32,
}

/// Parse output for one source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedFile {
    /// Scanner metadata for the file.
    pub file: SourceFile,
    /// Imports in source order.
    pub imports: Vec<ImportRecord>,
    /// Exported identifiers.
    pub exports: BTreeSet<String>,
    /// Human-readable parse problems. Never empties the rest of the
    /// struct: extraction is best-effort.
    pub errors: Vec<String>,
}

impl ParsedFile {
    pub fn new(file: SourceFile) -> Self {
        Self {
            file,
            imports: Vec::new(),
            exports: BTreeSet::new(),
            errors: Vec::new(),
        }
    }
}
