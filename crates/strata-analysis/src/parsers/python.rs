//! Python parser — line-oriented lexical extraction.
//!
//! Imports occupy a restricted grammar that survives comment and string
//! stripping, so no AST is needed. The stripper preserves line counts,
//! which keeps reported line numbers aligned with the original bytes.
//! `__all__` is read from the original content because its entries are
//! string literals the stripper would otherwise erase.

use smallvec::SmallVec;

use crate::scanner::{Language, SourceFile};

use super::strip::strip_python;
use super::traits::LanguageParser;
use super::types::{ImportKind, ImportRecord, ParsedFile};

const EXTENSIONS: &[&str] = &["py", "pyw", "pyi"];

/// Python parser.
#[derive(Debug)]
pub struct PythonParser;

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PythonParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for PythonParser {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn parse(&self, source: &str, file: &SourceFile) -> ParsedFile {
        let mut parsed = ParsedFile::new(file.clone());
        let stripped = strip_python(source);
        let lines: Vec<&str> = stripped.lines().collect();

        let mut i = 0;
        while i < lines.len() {
            let line_no = i as u32 + 1;
            let trimmed = lines[i].trim();

            if let Some(rest) = trimmed.strip_prefix("import ") {
                extract_plain_imports(rest, line_no, &mut parsed);
            } else if let Some(rest) = trimmed.strip_prefix("from ") {
                // Parenthesized name lists may span lines; join until the
                // closing paren before extracting.
                let mut logical = rest.to_string();
                if logical.contains('(') && !logical.contains(')') {
                    while i + 1 < lines.len() && !logical.contains(')') {
                        i += 1;
                        logical.push(' ');
                        logical.push_str(lines[i].trim());
                    }
                }
                extract_from_import(&logical, line_no, &mut parsed);
            }

            i += 1;
        }

        extract_all_exports(source, &mut parsed);
        parsed
    }
}

/// `import A, B as C` — one record per comma-separated module.
fn extract_plain_imports(rest: &str, line: u32, parsed: &mut ParsedFile) {
    for entry in rest.split(',') {
        let module = entry.split_whitespace().next().unwrap_or("");
        if module.is_empty() {
            continue;
        }
        parsed.imports.push(make_record(
            module.to_string(),
            ImportKind::PythonImport,
            SmallVec::new(),
            line,
        ));
    }
}

/// `from PKG import NAME, …` with optional parens and aliases.
fn extract_from_import(rest: &str, line: u32, parsed: &mut ParsedFile) {
    let Some(import_idx) = find_import_keyword(rest) else {
        return;
    };
    let module = rest[..import_idx].trim();
    if module.is_empty() {
        return;
    }

    let name_list = rest[import_idx + "import".len()..]
        .trim()
        .trim_start_matches('(')
        .trim_end_matches(')');

    let mut names: SmallVec<[String; 4]> = SmallVec::new();
    for entry in name_list.split(',') {
        // Strip `as ALIAS`; `*` passes through as-is.
        let name = entry.split_whitespace().next().unwrap_or("");
        if !name.is_empty() {
            names.push(name.to_string());
        }
    }

    parsed.imports.push(make_record(
        module.to_string(),
        ImportKind::PythonFrom,
        names,
        line,
    ));
}

/// Position of the standalone `import` keyword in a `from …` clause.
fn find_import_keyword(rest: &str) -> Option<usize> {
    let mut search_from = 0;
    while let Some(rel_idx) = rest[search_from..].find("import") {
        let idx = search_from + rel_idx;
        let before_ok = idx == 0
            || rest[..idx]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_whitespace());
        let after = rest[idx + "import".len()..].chars().next();
        let after_ok = after.map_or(true, |c| c.is_whitespace() || c == '(');
        if before_ok && after_ok {
            return Some(idx);
        }
        search_from = idx + "import".len();
    }
    None
}

fn make_record(
    source: String,
    kind: ImportKind,
    names: SmallVec<[String; 4]>,
    line: u32,
) -> ImportRecord {
    let is_relative = source.starts_with('.');
    // Parser-level heuristic: a bare top-level name is an installed
    // package; a dotted path may still resolve inside the project.
    let is_external = !is_relative && !source.contains('.');
    ImportRecord {
        source,
        kind,
        names,
        is_relative,
        is_external,
        line,
    }
}

/// Collect `__all__ = [ … ]` (or tuple form) entries as export names.
/// Runs over the original content since the entries are string literals.
fn extract_all_exports(source: &str, parsed: &mut ParsedFile) {
    let Some(idx) = source.find("__all__") else {
        return;
    };
    // Module level only.
    let at_line_start = idx == 0 || source.as_bytes()[idx - 1] == b'\n';
    if !at_line_start {
        return;
    }

    let after = &source[idx + "__all__".len()..];
    let Some(eq_idx) = after.find('=') else {
        return;
    };
    let after_eq = &after[eq_idx + 1..];
    let Some(open) = after_eq.find(['[', '(']) else {
        return;
    };
    let close_char = if after_eq.as_bytes()[open] == b'[' { ']' } else { ')' };
    let Some(close) = after_eq[open..].find(close_char) else {
        return;
    };
    let body = &after_eq[open + 1..open + close];

    for entry in body.split(',') {
        let name = entry.trim().trim_matches(|c| c == '"' || c == '\'');
        if !name.is_empty() {
            parsed.exports.insert(name.to_string());
        }
    }
}
