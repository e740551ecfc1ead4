//! Parser extraction completeness: every textual import appears at least
//! once, in source order, with correct 1-based line numbers, and the
//! relative/external classification follows the per-language rules.

use std::path::{Path, PathBuf};

use strata_analysis::parsers::{ImportKind, ParsedFile, ParserRegistry};
use strata_analysis::{Language, SourceFile};

fn source_file(rel: &str) -> SourceFile {
    let ext = rel.rsplit('.').next().unwrap();
    SourceFile {
        path: PathBuf::from(format!("/project/{rel}")),
        relative_path: rel.to_string(),
        size: 0,
        language: Language::from_extension(ext).unwrap(),
    }
}

fn parse(rel: &str, source: &str) -> ParsedFile {
    let registry = ParserRegistry::for_extensions(&[".ts".to_string()]).unwrap();
    let file = source_file(rel);
    registry
        .parser_for(Path::new(&file.relative_path))
        .unwrap()
        .parse(source, &file)
}

#[test]
fn typescript_every_form_in_source_order() {
    let source = "\
import def from './a';
import { one, two } from './b';
import * as ns from 'pkg';
import './side';
const legacy = require('legacy-pkg');
export * from './all';
export { x as y } from './some';
async function go() {
    await import('./lazy');
}
";
    let parsed = parse("src/m.ts", source);

    let seen: Vec<(u32, ImportKind, &str)> = parsed
        .imports
        .iter()
        .map(|i| (i.line, i.kind, i.source.as_str()))
        .collect();

    assert_eq!(
        seen,
        vec![
            (1, ImportKind::Es6Default, "./a"),
            (2, ImportKind::Es6Named, "./b"),
            (3, ImportKind::Es6Namespace, "pkg"),
            (4, ImportKind::Es6Named, "./side"),
            (5, ImportKind::Commonjs, "legacy-pkg"),
            (6, ImportKind::ReExport, "./all"),
            (7, ImportKind::ReExport, "./some"),
            (9, ImportKind::Dynamic, "./lazy"),
        ]
    );

    // Lines are non-decreasing by construction; classification follows
    // the leading character.
    for import in &parsed.imports {
        let relative = import.source.starts_with('.') || import.source.starts_with('/');
        assert_eq!(import.is_relative, relative, "{}", import.source);
        assert_eq!(import.is_external, !relative, "{}", import.source);
    }
}

#[test]
fn python_forms_and_lines() {
    let source = "\
import os
import collections.abc
from . import sibling
from .models import User, Role
from ..shared import util


def main() -> None:
    pass
";
    let parsed = parse("app/pkg/m.py", source);

    let seen: Vec<(u32, ImportKind, &str)> = parsed
        .imports
        .iter()
        .map(|i| (i.line, i.kind, i.source.as_str()))
        .collect();

    assert_eq!(
        seen,
        vec![
            (1, ImportKind::PythonImport, "os"),
            (2, ImportKind::PythonImport, "collections.abc"),
            (3, ImportKind::PythonFrom, "."),
            (4, ImportKind::PythonFrom, ".models"),
            (5, ImportKind::PythonFrom, "..shared"),
        ]
    );

    // Top-level bare names are external; dotted and relative are not.
    assert!(parsed.imports[0].is_external);
    assert!(!parsed.imports[1].is_external);
    assert!(parsed.imports[2].is_relative && !parsed.imports[2].is_external);
}

#[test]
fn go_forms_and_lines() {
    let source = "\
package server

import \"fmt\"

import (
\t\"net/http\"
\tchi \"github.com/go-chi/chi/v5\"
)
";
    let parsed = parse("cmd/server/main.go", source);

    let seen: Vec<(u32, &str)> = parsed
        .imports
        .iter()
        .map(|i| (i.line, i.source.as_str()))
        .collect();
    assert_eq!(
        seen,
        vec![(3, "fmt"), (6, "net/http"), (7, "github.com/go-chi/chi/v5")]
    );
    assert!(parsed.imports.iter().all(|i| i.kind == ImportKind::GoImport));
    assert!(!parsed.imports[0].is_external);
    assert!(!parsed.imports[1].is_external);
    assert!(parsed.imports[2].is_external);
}

#[test]
fn java_forms_and_lines() {
    let source = "\
package com.acme.web;

import java.util.List;
import com.acme.core.Engine;
import org.slf4j.Logger;
import com.acme.core.helpers.*;
";
    let parsed = parse("src/com/acme/web/Handler.java", source);

    let seen: Vec<(u32, &str, bool)> = parsed
        .imports
        .iter()
        .map(|i| (i.line, i.source.as_str(), i.is_external))
        .collect();
    assert_eq!(
        seen,
        vec![
            (3, "java.util.List", true),
            (4, "com.acme.core.Engine", false),
            (5, "org.slf4j.Logger", true),
            (6, "com.acme.core.helpers", false),
        ]
    );
    assert_eq!(parsed.imports[3].names.as_slice(), ["*"]);
    assert!(parsed.imports.iter().all(|i| !i.is_relative));
}
