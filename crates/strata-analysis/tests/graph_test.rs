//! Graph-builder tests over hand-built parse results.

use std::collections::BTreeSet;
use std::path::PathBuf;

use smallvec::smallvec;
use strata_analysis::graph::GraphBuilder;
use strata_analysis::parsers::{ImportKind, ImportRecord, ParsedFile};
use strata_analysis::{Language, SourceFile};

fn parsed(rel: &str, imports: Vec<ImportRecord>) -> ParsedFile {
    let ext = rel.rsplit('.').next().unwrap();
    ParsedFile {
        file: SourceFile {
            path: PathBuf::from(format!("/p/{rel}")),
            relative_path: rel.to_string(),
            size: 0,
            language: Language::from_extension(ext).unwrap(),
        },
        imports,
        exports: BTreeSet::new(),
        errors: Vec::new(),
    }
}

fn import(source: &str, kind: ImportKind) -> ImportRecord {
    let is_relative = source.starts_with('.') || source.starts_with('/');
    ImportRecord {
        source: source.to_string(),
        kind,
        names: smallvec![],
        is_relative,
        is_external: !is_relative,
        line: 1,
    }
}

#[test]
fn three_parallel_imports_collapse_into_one_edge() {
    let graph = GraphBuilder::build(&[
        parsed(
            "src/a.ts",
            vec![
                import("./b", ImportKind::Es6Default),
                import("./b", ImportKind::Dynamic),
                import("./b", ImportKind::ReExport),
            ],
        ),
        parsed("src/b.ts", vec![]),
    ]);

    assert_eq!(graph.edges.len(), 1);
    let edge = &graph.edges[0];
    assert_eq!(edge.weight, 3);
    assert_eq!(edge.kinds.len(), 3);
    assert_eq!(graph.nodes["src/a.ts"].out_degree, 3);
    assert_eq!(graph.nodes["src/b.ts"].in_degree, 3);
}

#[test]
fn exact_path_wins_over_extension_probes() {
    // `./data` must resolve to the extensionless key of data.ts, not to
    // some other probe result; and the full form resolves identically.
    let graph = GraphBuilder::build(&[
        parsed(
            "src/a.ts",
            vec![
                import("./data", ImportKind::Es6Named),
                import("./data.ts", ImportKind::Es6Named),
            ],
        ),
        parsed("src/data.ts", vec![]),
    ]);

    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].weight, 2);
}

#[test]
fn directory_import_resolves_to_index_file() {
    let graph = GraphBuilder::build(&[
        parsed("src/a.ts", vec![import("./widgets", ImportKind::Es6Named)]),
        parsed("src/widgets/index.ts", vec![]),
    ]);

    assert!(graph.edge("src/a.ts", "src/widgets/index.ts").is_some());
}

#[test]
fn unresolved_imports_leave_no_dangling_edges() {
    let graph = GraphBuilder::build(&[parsed(
        "src/a.ts",
        vec![import("./missing", ImportKind::Es6Named)],
    )]);

    assert!(graph.edges.is_empty());
    assert_eq!(graph.nodes.len(), 1);
    assert_eq!(graph.nodes["src/a.ts"].out_degree, 0);
}

#[test]
fn external_package_names() {
    let graph = GraphBuilder::build(&[parsed(
        "src/a.ts",
        vec![
            import("lodash/fp", ImportKind::Es6Named),
            import("@scope/pkg/deep/mod", ImportKind::Es6Named),
            import("react", ImportKind::Es6Default),
        ],
    )]);

    let externals: Vec<&str> = graph
        .external_dependencies
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(externals, vec!["@scope/pkg", "lodash", "react"]);
}

#[test]
fn coupling_normalizes_against_the_busiest_module() {
    let graph = GraphBuilder::build(&[
        parsed(
            "src/hub.ts",
            vec![
                import("./a", ImportKind::Es6Named),
                import("./b", ImportKind::Es6Named),
            ],
        ),
        parsed("src/a.ts", vec![import("./b", ImportKind::Es6Named)]),
        parsed("src/b.ts", vec![]),
    ]);

    // b: in 2; hub: out 2; a: in 1 + out 1. Max total degree is 2.
    assert_eq!(graph.nodes["src/hub.ts"].coupling, 1.0);
    assert_eq!(graph.nodes["src/a.ts"].coupling, 1.0);
    assert_eq!(graph.nodes["src/b.ts"].coupling, 1.0);
}

#[test]
fn nodes_and_edges_iterate_in_sorted_order() {
    let graph = GraphBuilder::build(&[
        parsed("zeta/z.ts", vec![import("../alpha/a", ImportKind::Es6Named)]),
        parsed("alpha/a.ts", vec![import("../zeta/z", ImportKind::Es6Named)]),
        parsed("mid/m.ts", vec![]),
    ]);

    let paths: Vec<&str> = graph.nodes.keys().map(String::as_str).collect();
    assert_eq!(paths, vec!["alpha/a.ts", "mid/m.ts", "zeta/z.ts"]);

    let pairs: Vec<(&str, &str)> = graph
        .edges
        .iter()
        .map(|e| (e.source.as_str(), e.target.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![("alpha/a.ts", "zeta/z.ts"), ("zeta/z.ts", "alpha/a.ts")]
    );
}

#[test]
fn overlapping_cycles_are_all_discovered() {
    // a -> b -> a and b -> c -> b share the node b.
    let graph = GraphBuilder::build(&[
        parsed("a.ts", vec![import("./b", ImportKind::Es6Named)]),
        parsed(
            "b.ts",
            vec![
                import("./a", ImportKind::Es6Named),
                import("./c", ImportKind::Es6Named),
            ],
        ),
        parsed("c.ts", vec![import("./b", ImportKind::Es6Named)]),
    ]);

    assert_eq!(graph.cycles.len(), 2);
    for cycle in &graph.cycles {
        assert_eq!(cycle.first(), cycle.last());
        for pair in cycle.windows(2) {
            assert!(graph.edge(&pair[0], &pair[1]).is_some());
        }
    }
}
