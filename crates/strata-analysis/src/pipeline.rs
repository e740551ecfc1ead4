//! Pipeline entry point.

use std::fs;
use std::path::Path;

use chrono::Utc;
use rayon::prelude::*;

use strata_core::errors::PipelineError;
use strata_core::ProjectConfig;

use crate::graph::GraphBuilder;
use crate::health;
use crate::layers;
use crate::parsers::{ParsedFile, ParserRegistry};
use crate::result::AnalysisResult;
use crate::scanner::{Scanner, SourceFile};

/// Run the full analysis over a project root.
///
/// Fatal only on an unreadable root, a parser registry that covers none
/// of the configured extensions, or an unloadable grammar. Per-file
/// parse failures and unresolved imports are collected into the result.
pub fn analyze(root: &Path, config: &ProjectConfig) -> Result<AnalysisResult, PipelineError> {
    let registry = ParserRegistry::for_extensions(&config.extensions)?;

    let scanner = Scanner::new(root, config);
    let files = scanner.scan()?;
    if files.is_empty() {
        tracing::warn!(root = %root.display(), "no matching source files; emitting empty result");
    }

    // Per-file work is pure; parse in parallel, keep file order.
    let parsed: Vec<ParsedFile> = files
        .par_iter()
        .map(|file| parse_one(&registry, file))
        .collect();

    let parse_errors: std::collections::BTreeMap<String, Vec<String>> = parsed
        .iter()
        .filter(|p| !p.errors.is_empty())
        .map(|p| (p.file.relative_path.clone(), p.errors.clone()))
        .collect();

    let mut graph = GraphBuilder::build(&parsed);
    let mut layer_list = layers::classify(&mut graph, config);
    layers::infer_hierarchy(&mut layer_list, &graph);
    let health = health::compute(&graph, &layer_list);

    tracing::debug!(
        files = files.len(),
        edges = graph.edges.len(),
        cycles = graph.cycles.len(),
        score = health.score,
        "analysis complete"
    );

    Ok(AnalysisResult {
        project_root: root.display().to_string(),
        generated_at: Utc::now(),
        total_files: files.len(),
        total_edges: graph.edges.len(),
        graph,
        layers: layer_list,
        health,
        parse_errors,
    })
}

fn parse_one(registry: &ParserRegistry, file: &SourceFile) -> ParsedFile {
    let Some(parser) = registry.parser_for(&file.path) else {
        let mut parsed = ParsedFile::new(file.clone());
        parsed
            .errors
            .push(format!("no parser for {}", file.relative_path));
        return parsed;
    };

    match fs::read_to_string(&file.path) {
        Ok(content) => parser.parse(&content, file),
        Err(e) => {
            let mut parsed = ParsedFile::new(file.clone());
            parsed.errors.push(format!("failed to read file: {e}"));
            parsed
        }
    }
}
