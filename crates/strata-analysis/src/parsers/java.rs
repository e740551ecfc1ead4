//! Java parser — line-oriented lexical extraction.
//!
//! Reads the `package` declaration first, because externality of an
//! import depends on whether its top-level segment matches the file's
//! own package root.

use regex::Regex;
use smallvec::{smallvec, SmallVec};
use std::sync::LazyLock;

use crate::scanner::{Language, SourceFile};

use super::strip::strip_slash_comments;
use super::traits::LanguageParser;
use super::types::{ImportKind, ImportRecord, ParsedFile};

const EXTENSIONS: &[&str] = &["java"];

/// Package roots that always mark an import as platform/external.
const STANDARD_PREFIXES: &[&str] = &["java", "javax", "sun", "com.sun"];

static PACKAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*package\s+([\w.]+)\s*;").expect("package regex"));

static IMPORT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*import\s+(static\s+)?([\w.]+?)(\.\*)?\s*;").expect("import regex")
});

static TYPE_DECL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"public\s+(?:abstract\s+|final\s+)?(?:class|interface|enum)\s+(\w+)")
        .expect("type decl regex")
});

/// Java parser.
#[derive(Debug)]
pub struct JavaParser;

impl Default for JavaParser {
    fn default() -> Self {
        Self::new()
    }
}

impl JavaParser {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageParser for JavaParser {
    fn language(&self) -> Language {
        Language::Java
    }

    fn extensions(&self) -> &[&str] {
        EXTENSIONS
    }

    fn parse(&self, source: &str, file: &SourceFile) -> ParsedFile {
        let mut parsed = ParsedFile::new(file.clone());
        let stripped = strip_slash_comments(source, false);

        let package_root = stripped
            .lines()
            .find_map(|l| PACKAGE_RE.captures(l))
            .map(|c| c[1].split('.').next().unwrap_or("").to_string())
            .unwrap_or_default();

        for (idx, line) in stripped.lines().enumerate() {
            let line_no = idx as u32 + 1;

            if let Some(caps) = IMPORT_RE.captures(line) {
                let dotted = caps[2].to_string();
                let is_wildcard = caps.get(3).is_some();

                let names: SmallVec<[String; 4]> = if is_wildcard {
                    smallvec!["*".to_string()]
                } else {
                    smallvec![dotted.rsplit('.').next().unwrap_or(&dotted).to_string()]
                };

                let top = dotted.split('.').next().unwrap_or(&dotted);
                let is_external = STANDARD_PREFIXES
                    .iter()
                    .any(|p| dotted == *p || dotted.starts_with(&format!("{p}.")))
                    || top != package_root;

                parsed.imports.push(ImportRecord {
                    source: dotted,
                    kind: ImportKind::JavaImport,
                    names,
                    is_relative: false,
                    is_external,
                    line: line_no,
                });
            }

            if let Some(caps) = TYPE_DECL_RE.captures(line) {
                parsed.exports.insert(caps[1].to_string());
            }
        }

        parsed
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
            language: Language::Java,
        }
    }

    fn parse(source: &str) -> ParsedFile {
        JavaParser::new().parse(source, &file("src/com/acme/UserService.java"))
    }

    #[test]
    fn plain_and_static_imports() {
        let parsed = parse(
            "package com.acme;\n\nimport java.util.List;\nimport static org.junit.Assert.assertEquals;\nimport com.acme.db.UserRepository;\n",
        );

        assert_eq!(parsed.imports.len(), 3);
        assert_eq!(parsed.imports[0].source, "java.util.List");
        assert_eq!(parsed.imports[0].names.as_slice(), ["List"]);
        assert!(parsed.imports[0].is_external);

        assert_eq!(parsed.imports[1].source, "org.junit.Assert.assertEquals");
        assert!(parsed.imports[1].is_external);

        // Same package root as the file: internal.
        assert_eq!(parsed.imports[2].source, "com.acme.db.UserRepository");
        assert!(!parsed.imports[2].is_external);
        assert_eq!(parsed.imports[2].names.as_slice(), ["UserRepository"]);
    }

    #[test]
    fn wildcard_import() {
        let parsed = parse("package com.acme;\nimport java.util.*;\n");
        let rec = &parsed.imports[0];
        assert_eq!(rec.source, "java.util");
        assert_eq!(rec.names.as_slice(), ["*"]);
        assert_eq!(rec.line, 2);
    }

    #[test]
    fn com_sun_is_standard() {
        let parsed = parse("package com.acme;\nimport com.sun.misc.Unsafe;\n");
        assert!(parsed.imports[0].is_external);
    }

    #[test]
    fn missing_package_makes_everything_external() {
        let parsed = parse("import org.example.Thing;\n");
        assert!(parsed.imports[0].is_external);
    }

    #[test]
    fn public_type_declarations_are_exports() {
        let parsed = parse(
            "package com.acme;\npublic class UserService {}\npublic abstract class Base {}\npublic interface Repo {}\npublic enum Color {}\nclass Hidden {}\n",
        );

        for name in ["UserService", "Base", "Repo", "Color"] {
            assert!(parsed.exports.contains(name), "missing {name}");
        }
        assert!(!parsed.exports.contains("Hidden"));
    }

    #[test]
    fn commented_imports_are_ignored() {
        let parsed = parse("package com.acme;\n// import java.fake.Thing;\nimport java.util.Map;\n");
        assert_eq!(parsed.imports.len(), 1);
        assert_eq!(parsed.imports[0].line, 3);
    }
}
