//! TypeScript/JavaScript parser built on tree-sitter.
//!
//! Uses the full grammar with error recovery: ERROR and MISSING nodes are
//! reported as parse errors while extraction proceeds over the recovered
//! tree, so a half-broken file still yields its valid imports.
//!
//! Grammar selection by extension: `.tsx`/`.jsx` get the TSX grammar,
//! `.js .mjs .cjs` the JavaScript grammar, everything else TypeScript.

use std::collections::BTreeSet;

use smallvec::{smallvec, SmallVec};
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

use strata_core::errors::ParseError;

use crate::scanner::{Language, SourceFile};

use super::traits::LanguageParser;
use super::types::{ImportKind, ImportRecord, ParsedFile};

const EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mjs", "cjs", "mts", "cts"];

const IMPORT_QUERY: &str = r#"
(import_statement
    (import_clause
        (identifier)? @default
        (named_imports (import_specifier name: (identifier) @named)*)?
        (namespace_import (identifier) @namespace)?
    )?
    source: (string) @source
) @import
"#;

const EXPORT_QUERY: &str = "(export_statement) @export";

/// Queries compiled against one grammar.
#[derive(Debug)]
struct GrammarSet {
    language: tree_sitter::Language,
    import_query: Query,
    export_query: Query,
}

impl GrammarSet {
    fn new(name: &str, language: tree_sitter::Language) -> Result<Self, ParseError> {
        let import_query = Query::new(&language, IMPORT_QUERY).map_err(|e| ParseError::Query {
            language: name.to_string(),
            message: e.to_string(),
        })?;
        let export_query = Query::new(&language, EXPORT_QUERY).map_err(|e| ParseError::Query {
            language: name.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            language,
            import_query,
            export_query,
        })
    }
}

/// TypeScript/JavaScript parser.
#[derive(Debug)]
pub struct TypeScriptParser {
    typescript: GrammarSet,
    tsx: GrammarSet,
    javascript: GrammarSet,
}

impl TypeScriptParser {
    pub fn new() -> Result<Self, ParseError> {
        Ok(Self {
            typescript: GrammarSet::new(
                "typescript",
                tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            )?,
            tsx: GrammarSet::new("tsx", tree_sitter_typescript::LANGUAGE_TSX.into())?,
            javascript: GrammarSet::new("javascript", tree_sitter_javascript::LANGUAGE.into())?,
        })
    }

    fn grammar_for(&self, file: &SourceFile) -> &GrammarSet {
        let ext = file
            .relative_path
            .rsplit('.')
            .next()
            .unwrap_or("")
            .to_lowercase();
        match ext.as_str() {
            "tsx" | "jsx" => &self.tsx,
            "js" | "mjs" | "cjs" => &self.javascript,
            _ => &self.typescript,
        }
    }
}

impl LanguageParser for TypeScriptParser {
    fn language(&self) -> Language {
        Language::TypeScript
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn parse(&self, source: &str, file: &SourceFile) -> ParsedFile {
        let mut parsed = ParsedFile::new(file.clone());
        let grammar = self.grammar_for(file);

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&grammar.language) {
            parsed.errors.push(format!("grammar unavailable: {e}"));
            return parsed;
        }

        let tree = match parser.parse(source, None) {
            Some(t) => t,
            None => {
                parsed.errors.push("failed to parse source".to_string());
                return parsed;
            }
        };

        let root = tree.root_node();
        let bytes = source.as_bytes();

        collect_syntax_errors(&root, &mut parsed.errors);
        self.extract_imports(grammar, &root, bytes, &mut parsed);
        self.extract_exports(grammar, &root, bytes, &mut parsed);
        extract_call_imports(&root, bytes, &mut parsed);

        // Query extraction groups records by form; restore source order.
        parsed.imports.sort_by_key(|r| r.line);
        parsed
    }
}

impl TypeScriptParser {
    fn extract_imports(
        &self,
        grammar: &GrammarSet,
        root: &Node,
        source: &[u8],
        parsed: &mut ParsedFile,
    ) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&grammar.import_query, *root, source);

        while let Some(m) = matches.next() {
            let mut import_source = String::new();
            let mut named: SmallVec<[String; 4]> = SmallVec::new();
            let mut default = None;
            let mut namespace = None;
            let mut line = 1;

            for capture in m.captures {
                let node = capture.node;
                let capture_name = grammar.import_query.capture_names()[capture.index as usize];
                match capture_name {
                    "source" => {
                        let text = node.utf8_text(source).unwrap_or("");
                        import_source = unquote(text).to_string();
                    }
                    "named" => named.push(node.utf8_text(source).unwrap_or("").to_string()),
                    "default" => {
                        default = Some(node.utf8_text(source).unwrap_or("").to_string())
                    }
                    "namespace" => {
                        namespace = Some(node.utf8_text(source).unwrap_or("").to_string())
                    }
                    "import" => line = node.start_position().row as u32 + 1,
                    _ => {}
                }
            }

            if import_source.is_empty() {
                continue;
            }

            // One record per declaration. Mixed clauses collapse by
            // precedence (namespace > default > named); a bare
            // side-effect import is a named import with no names.
            let (kind, names) = if let Some(ns) = namespace {
                (ImportKind::Es6Namespace, smallvec![ns])
            } else if let Some(d) = default {
                let mut names = smallvec![d];
                names.extend(named);
                (ImportKind::Es6Default, names)
            } else {
                (ImportKind::Es6Named, named)
            };

            parsed.imports.push(record(import_source, kind, names, line));
        }
    }

    fn extract_exports(
        &self,
        grammar: &GrammarSet,
        root: &Node,
        source: &[u8],
        parsed: &mut ParsedFile,
    ) {
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&grammar.export_query, *root, source);

        while let Some(m) = matches.next() {
            for capture in m.captures {
                handle_export_statement(&capture.node, source, parsed);
            }
        }
    }
}

/// Process one `export_statement` node: local exports feed the export
/// set, `export … from` forms additionally produce a re-export import.
fn handle_export_statement(node: &Node, source: &[u8], parsed: &mut ParsedFile) {
    let line = node.start_position().row as u32 + 1;

    let from_source = node
        .child_by_field_name("source")
        .map(|n| unquote(n.utf8_text(source).unwrap_or("")).to_string());

    let mut names: SmallVec<[String; 4]> = SmallVec::new();
    let mut is_default = false;

    let mut walker = node.walk();
    for child in node.children(&mut walker) {
        match child.kind() {
            "default" => is_default = true,
            "export_clause" => {
                let mut spec_walker = child.walk();
                for spec in child.named_children(&mut spec_walker) {
                    if spec.kind() != "export_specifier" {
                        continue;
                    }
                    // The exported name is the alias when present.
                    let exported = spec
                        .child_by_field_name("alias")
                        .or_else(|| spec.child_by_field_name("name"))
                        .and_then(|n| n.utf8_text(source).ok())
                        .unwrap_or("");
                    if !exported.is_empty() {
                        names.push(exported.to_string());
                    }
                }
            }
            "namespace_export" => {
                // export * as ns from 'x'
                let mut ns_walker = child.walk();
                for ident in child.named_children(&mut ns_walker) {
                    if let Ok(text) = ident.utf8_text(source) {
                        names.push(text.to_string());
                    }
                }
            }
            _ => {}
        }
    }

    if is_default {
        parsed.exports.insert("default".to_string());
    }

    if let Some(decl) = node.child_by_field_name("declaration") {
        collect_declaration_names(&decl, source, &mut parsed.exports);
    }

    for name in &names {
        parsed.exports.insert(name.clone());
    }

    if let Some(src) = from_source {
        parsed
            .imports
            .push(record(src, ImportKind::ReExport, names, line));
    }
}

/// Exported identifiers from `export function/class/const …` declarations.
fn collect_declaration_names(decl: &Node, source: &[u8], exports: &mut BTreeSet<String>) {
    match decl.kind() {
        "function_declaration" | "generator_function_declaration" => {
            if let Some(name) = decl.child_by_field_name("name") {
                if let Ok(text) = name.utf8_text(source) {
                    exports.insert(text.to_string());
                }
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(name) = decl.child_by_field_name("name") {
                if let Ok(text) = name.utf8_text(source) {
                    exports.insert(text.to_string());
                }
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            let mut walker = decl.walk();
            for declarator in decl.named_children(&mut walker) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                if let Some(name) = declarator.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        if let Ok(text) = name.utf8_text(source) {
                            exports.insert(text.to_string());
                        }
                    }
                }
            }
        }
        _ => {}
    }
}

/// Walk the tree for `require('x')` and `import('x')` call expressions.
/// Only string-literal arguments count; computed specifiers are not
/// statically resolvable and are skipped.
fn extract_call_imports(root: &Node, source: &[u8], parsed: &mut ParsedFile) {
    let mut stack = vec![*root];
    let mut walker = root.walk();

    while let Some(node) = stack.pop() {
        if node.kind() == "call_expression" {
            if let Some(function) = node.child_by_field_name("function") {
                let kind = match function.kind() {
                    "import" => Some(ImportKind::Dynamic),
                    "identifier" if function.utf8_text(source) == Ok("require") => {
                        Some(ImportKind::Commonjs)
                    }
                    _ => None,
                };

                if let Some(kind) = kind {
                    if let Some(src) = string_argument(&node, source) {
                        let line = node.start_position().row as u32 + 1;
                        parsed.imports.push(record(src, kind, SmallVec::new(), line));
                    }
                }
            }
        }

        walker.reset(node);
        if walker.goto_first_child() {
            loop {
                stack.push(walker.node());
                if !walker.goto_next_sibling() {
                    break;
                }
            }
        }
    }

    // Stack order reversed the tree order; the caller re-sorts by line.
}

/// First argument of a call when it is a plain string literal.
fn string_argument(call: &Node, source: &[u8]) -> Option<String> {
    let args = call.child_by_field_name("arguments")?;
    let first = args.named_child(0)?;
    if first.kind() != "string" {
        return None;
    }
    Some(unquote(first.utf8_text(source).ok()?).to_string())
}

/// Report ERROR and MISSING nodes as parse errors, one per line.
fn collect_syntax_errors(root: &Node, errors: &mut Vec<String>) {
    let mut lines = BTreeSet::new();
    let mut stack = vec![*root];
    let mut walker = root.walk();

    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            lines.insert(node.start_position().row as u32 + 1);
        }
        walker.reset(node);
        if walker.goto_first_child() {
            loop {
                stack.push(walker.node());
                if !walker.goto_next_sibling() {
                    break;
                }
            }
        }
    }

    for line in lines {
        errors.push(format!("syntax error at line {line}"));
    }
}

fn record(
    source: String,
    kind: ImportKind,
    names: SmallVec<[String; 4]>,
    line: u32,
) -> ImportRecord {
    let is_relative = source.starts_with('.') || source.starts_with('/');
    ImportRecord {
        is_relative,
        is_external: !is_relative,
        source,
        kind,
        names,
        line,
    }
}

fn unquote(text: &str) -> &str {
    text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
}
