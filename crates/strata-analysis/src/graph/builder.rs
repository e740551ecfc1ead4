//! Graph builder — two passes plus derived computations.

use std::collections::BTreeSet;

use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::parsers::{ImportKind, ParsedFile};

use super::cycles;
use super::metrics;
use super::resolver::{self, LookupTable};
use super::types::{DependencyGraph, ModuleEdge, ModuleNode, ENTRY_POINT_STEMS};

/// Collapsed edge attributes during the build.
#[derive(Debug, Clone, Default)]
pub(crate) struct EdgeAttrs {
    pub weight: u32,
    pub kinds: BTreeSet<ImportKind>,
}

pub(crate) type BuildGraph = DiGraph<ModuleNode, EdgeAttrs>;

/// Builds the dependency graph from parsed files.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Construct the graph. Input order does not matter; the caller's
    /// files are indexed in sorted order internally and the public view
    /// is sorted regardless.
    pub fn build(parsed: &[ParsedFile]) -> DependencyGraph {
        let mut graph: BuildGraph = DiGraph::new();
        let mut by_path: FxHashMap<String, NodeIndex> = FxHashMap::default();
        let mut lookup = LookupTable::new();

        // Sorted insertion keeps node indices, lookup collisions, and
        // neighbor iteration deterministic.
        let mut ordered: Vec<&ParsedFile> = parsed.iter().collect();
        ordered.sort_by(|a, b| a.file.relative_path.cmp(&b.file.relative_path));

        // Pass 1 — node creation.
        for pf in &ordered {
            let rel = &pf.file.relative_path;
            if by_path.contains_key(rel) {
                continue;
            }
            let idx = graph.add_node(make_node(pf));
            by_path.insert(rel.clone(), idx);
            lookup.insert(rel, pf.file.stem(), pf.file.relative_dir(), idx);
        }

        // Pass 2 — import resolution.
        let mut externals = BTreeSet::new();
        for pf in &ordered {
            let from = by_path[&pf.file.relative_path];
            let dir = pf.file.relative_dir();

            for import in &pf.imports {
                if import.is_external {
                    externals.insert(resolver::package_name(&import.source));
                    continue;
                }

                match resolver::candidate_for(import, dir) {
                    Some(candidate) => match lookup.probe(&candidate) {
                        Some(target) => {
                            add_import(&mut graph, from, target, import.kind);
                        }
                        None => {
                            tracing::debug!(
                                file = %pf.file.relative_path,
                                source = %import.source,
                                candidate = %candidate,
                                "unresolved import"
                            );
                        }
                    },
                    None => {
                        // Dots-only Python source: resolve each imported
                        // name as a module in the referenced package.
                        resolve_python_names(
                            &mut graph,
                            &lookup,
                            from,
                            pf,
                            &import.source,
                            &import.names,
                            import.kind,
                            dir,
                        );
                    }
                }
            }
        }

        // Derived values.
        metrics::apply_degrees_and_coupling(&mut graph);
        let cycle_list = cycles::detect(&graph);

        flatten(graph, externals, cycle_list)
    }
}

fn make_node(pf: &ParsedFile) -> ModuleNode {
    let stem = pf.file.stem();
    let name = if stem.eq_ignore_ascii_case("index") {
        let dir = pf.file.relative_dir();
        match dir.rsplit('/').next() {
            Some(parent) if !parent.is_empty() => parent.to_string(),
            _ => stem.to_string(),
        }
    } else {
        stem.to_string()
    };

    let is_entry_point = ENTRY_POINT_STEMS
        .iter()
        .any(|e| stem.eq_ignore_ascii_case(e));

    ModuleNode {
        path: pf.file.relative_path.clone(),
        name,
        language: pf.file.language,
        is_entry_point,
        in_degree: 0,
        out_degree: 0,
        coupling: 0.0,
        layer: None,
    }
}

fn add_import(graph: &mut BuildGraph, from: NodeIndex, to: NodeIndex, kind: ImportKind) {
    match graph.find_edge(from, to) {
        Some(edge) => {
            if let Some(attrs) = graph.edge_weight_mut(edge) {
                attrs.weight += 1;
                attrs.kinds.insert(kind);
            }
        }
        None => {
            let mut kinds = BTreeSet::new();
            kinds.insert(kind);
            graph.add_edge(from, to, EdgeAttrs { weight: 1, kinds });
        }
    }
}

/// `from . import a, b` — probe each name as `package_dir/name`.
#[allow(clippy::too_many_arguments)]
fn resolve_python_names(
    graph: &mut BuildGraph,
    lookup: &LookupTable,
    from: NodeIndex,
    pf: &ParsedFile,
    source: &str,
    names: &[String],
    kind: ImportKind,
    dir: &str,
) {
    let Some(package_dir) = resolver::python_package_dir(source, dir) else {
        tracing::debug!(
            file = %pf.file.relative_path,
            source = %source,
            "unresolved import"
        );
        return;
    };

    for name in names {
        if name == "*" {
            continue;
        }
        let candidate = if package_dir.is_empty() {
            name.clone()
        } else {
            format!("{package_dir}/{name}")
        };
        match lookup.probe(&candidate) {
            Some(target) => add_import(graph, from, target, kind),
            None => {
                tracing::debug!(
                    file = %pf.file.relative_path,
                    source = %source,
                    name = %name,
                    candidate = %candidate,
                    "unresolved import"
                );
            }
        }
    }
}

/// Produce the sorted public view.
fn flatten(
    graph: BuildGraph,
    external_dependencies: BTreeSet<String>,
    cycles: Vec<Vec<String>>,
) -> DependencyGraph {
    let mut edges: Vec<ModuleEdge> = graph
        .edge_indices()
        .filter_map(|e| {
            let (s, t) = graph.edge_endpoints(e)?;
            let attrs = graph.edge_weight(e)?;
            Some(ModuleEdge {
                source: graph[s].path.clone(),
                target: graph[t].path.clone(),
                weight: attrs.weight,
                kinds: attrs.kinds.clone(),
            })
        })
        .collect();
    edges.sort_by(|a, b| (&a.source, &a.target).cmp(&(&b.source, &b.target)));

    let nodes = graph
        .node_weights()
        .map(|n| (n.path.clone(), n.clone()))
        .collect();

    DependencyGraph {
        nodes,
        edges,
        external_dependencies,
        cycles,
    }
}
