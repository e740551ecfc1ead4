//! Go parser — line-oriented lexical extraction.
//!
//! Handles the single `import "path"` form and `import ( … )` blocks,
//! with optional alias identifiers. Comment stripping is string-aware so
//! quoted import paths survive the pre-pass.

use smallvec::smallvec;

use crate::scanner::{Language, SourceFile};

use super::strip::strip_slash_comments;
use super::traits::LanguageParser;
use super::types::{ImportKind, ImportRecord, ParsedFile};

const EXTENSIONS: &[&str] = &["go"];

/// Hosting prefixes that mark an import as an external module even when
/// the first path segment carries no dot.
const HOSTING_PREFIXES: &[&str] = &[
    "github.com/",
    "gitlab.com/",
    "bitbucket.org/",
    "golang.org/",
    "google.golang.org/",
    "gopkg.in/",
    "go.uber.org/",
    "k8s.io/",
    "sigs.k8s.io/",
];

/// Top-level packages of the Go standard library. Imports rooted here are
/// neither external nor project-resolvable.
const GO_STDLIB: &[&str] = &[
    "archive", "bufio", "builtin", "bytes", "cmp", "compress", "container", "context", "crypto",
    "database", "debug", "embed", "encoding", "errors", "expvar", "flag", "fmt", "go", "hash",
    "html", "image", "index", "io", "iter", "log", "maps", "math", "mime", "net", "os", "path",
    "plugin", "reflect", "regexp", "runtime", "slices", "sort", "strconv", "strings", "sync",
    "syscall", "testing", "text", "time", "unicode", "unsafe",
];

/// True when an import path roots in the Go standard library.
pub fn is_std_library(path: &str) -> bool {
    let first = path.split('/').next().unwrap_or(path);
    GO_STDLIB.contains(&first)
}

/// Go parser.
#[derive(Debug)]
pub struct GoParser;

impl Default for GoParser {
    fn default() -> Self {
        Self::new()
    }
}

impl GoParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for GoParser {
    fn language(&self) -> Language {
        Language::Go
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn parse(&self, source: &str, file: &SourceFile) -> ParsedFile {
        let mut parsed = ParsedFile::new(file.clone());
        let stripped = strip_slash_comments(source, true);
        let lines: Vec<&str> = stripped.lines().collect();

        let mut in_block = false;
        for (idx, raw_line) in lines.iter().copied().enumerate() {
            let line_no = idx as u32 + 1;
            let line = raw_line.trim();

            if in_block {
                if line.starts_with(')') {
                    in_block = false;
                    continue;
                }
                if let Some(record) = import_spec(line, line_no) {
                    parsed.imports.push(record);
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix("import") {
                let rest = rest.trim_start();
                if let Some(rest) = rest.strip_prefix('(') {
                    // Specs may share the opening line: import ( "fmt"
                    if let Some(record) = import_spec(rest.trim(), line_no) {
                        parsed.imports.push(record);
                    }
                    // A one-line block closes immediately.
                    in_block = !rest.contains(')');
                } else if let Some(record) = import_spec(rest, line_no) {
                    parsed.imports.push(record);
                }
            }

            extract_exports(raw_line, &mut parsed);
        }

        parsed
    }
}

/// Parse one import spec: optional alias identifier, then a quoted path.
fn import_spec(line: &str, line_no: u32) -> Option<ImportRecord> {
    let quote_start = line.find('"')?;
    let rest = &line[quote_start + 1..];
    let quote_end = rest.find('"')?;
    let path = &rest[..quote_end];
    if path.is_empty() {
        return None;
    }

    let alias = line[..quote_start].trim();
    let name = if alias.is_empty() || alias == "_" || alias == "." {
        path.rsplit('/').next().unwrap_or(path).to_string()
    } else {
        alias.to_string()
    };

    let is_relative = path.starts_with("./") || path.starts_with("../");
    let first = path.split('/').next().unwrap_or(path);
    let is_external = !is_relative
        && (first.contains('.') || HOSTING_PREFIXES.iter().any(|p| path.starts_with(p)));

    Some(ImportRecord {
        source: path.to_string(),
        kind: ImportKind::GoImport,
        names: smallvec![name],
        is_relative,
        is_external,
        line: line_no,
    })
}

/// Top-level `func`/`type` declarations whose identifier is exported
/// (uppercase initial). Methods with receivers count; unexported
/// identifiers do not.
fn extract_exports(raw_line: &str, parsed: &mut ParsedFile) {
    let name = if let Some(rest) = raw_line.strip_prefix("func ") {
        let rest = rest.trim_start();
        if rest.starts_with('(') {
            // Method: skip the receiver parameter list.
            rest.find(')')
                .map(|end| rest[end + 1..].trim_start())
                .and_then(first_identifier)
        } else {
            first_identifier(rest)
        }
    } else if let Some(rest) = raw_line.strip_prefix("type ") {
        first_identifier(rest.trim_start())
    } else {
        None
    };

    if let Some(name) = name {
        if name.chars().next().is_some_and(|c| c.is_uppercase()) {
            parsed.exports.insert(name.to_string());
        }
    }
}

fn first_identifier(text: &str) -> Option<&str> {
    let end = text
        .find(|c: char| !c.is_alphanumeric() && c != '_')
        .unwrap_or(text.len());
    if end == 0 {
        None
    } else {
        Some(&text[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn file(rel: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(format!("/p/{rel}")),
            relative_path: rel.to_string(),
            size: 0,
            language: Language::Go,
        }
    }

    fn parse(source: &str) -> ParsedFile {
        GoParser::new().parse(source, &file("cmd/server/main.go"))
    }

    #[test]
    fn single_import_form() {
        let parsed = parse("package main\n\nimport \"fmt\"\n");
        assert_eq!(parsed.imports.len(), 1);
        let rec = &parsed.imports[0];
        assert_eq!(rec.source, "fmt");
        assert_eq!(rec.kind, ImportKind::GoImport);
        assert_eq!(rec.names.as_slice(), ["fmt"]);
        assert!(!rec.is_external);
        assert_eq!(rec.line, 3);
    }

    #[test]
    fn block_import_with_aliases() {
        let parsed = parse(
            "package main\n\nimport (\n\t\"net/http\"\n\tlog \"github.com/sirupsen/logrus\"\n\t_ \"embed\"\n)\n",
        );

        assert_eq!(parsed.imports.len(), 3);
        assert_eq!(parsed.imports[0].source, "net/http");
        assert_eq!(parsed.imports[0].names.as_slice(), ["http"]);
        assert!(!parsed.imports[0].is_external);

        assert_eq!(parsed.imports[1].source, "github.com/sirupsen/logrus");
        assert_eq!(parsed.imports[1].names.as_slice(), ["log"]);
        assert!(parsed.imports[1].is_external);

        assert_eq!(parsed.imports[2].names.as_slice(), ["embed"]);
    }

    #[test]
    fn relative_imports_are_flagged() {
        let parsed = parse("import \"./internal/auth\"\n");
        assert!(parsed.imports[0].is_relative);
        assert!(!parsed.imports[0].is_external);
    }

    #[test]
    fn stdlib_detection() {
        assert!(is_std_library("net/http"));
        assert!(is_std_library("fmt"));
        assert!(!is_std_library("github.com/x/y"));
    }

    #[test]
    fn exported_funcs_and_types() {
        let parsed = parse(
            "package auth\n\nfunc Login() {}\nfunc logout() {}\nfunc (s *Service) Handle() {}\ntype Token struct{}\ntype secret struct{}\n",
        );

        assert!(parsed.exports.contains("Login"));
        assert!(parsed.exports.contains("Handle"));
        assert!(parsed.exports.contains("Token"));
        assert!(!parsed.exports.contains("logout"));
        assert!(!parsed.exports.contains("secret"));
    }

    #[test]
    fn comments_do_not_yield_imports() {
        let parsed = parse("// import \"fake\"\n/*\nimport \"also-fake\"\n*/\nimport \"real\"\n");
        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.imports[0].source, "real");
        assert_eq!(parsed.imports[0].line, 5);
    }
}
