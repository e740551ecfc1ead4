//! Import-source resolution against the known file set.
//!
//! The lookup table holds up to three keys per file: its relative path,
//! that path with the extension stripped, and, for `index` files, the
//! parent directory. Resolution probes a fixed candidate sequence; the
//! first hit wins and misses are dropped by the caller.

use petgraph::graph::NodeIndex;
use rustc_hash::FxHashMap;

use crate::parsers::{ImportKind, ImportRecord};

/// Extensions appended when probing an extensionless candidate.
const PROBE_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx", ".py"];

/// Suffixes probed for directory imports.
const INDEX_SUFFIXES: &[&str] = &["/index", "/index.ts", "/index.js"];

/// Path → node lookup table.
pub struct LookupTable {
    map: FxHashMap<String, NodeIndex>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self {
            map: FxHashMap::default(),
        }
    }

    /// Register a file under its probe keys. Earlier registrations win on
    /// key collisions, which keeps resolution deterministic because files
    /// are inserted in sorted order.
    pub fn insert(&mut self, relative_path: &str, stem: &str, dir: &str, idx: NodeIndex) {
        self.map.entry(relative_path.to_string()).or_insert(idx);

        let stripped = strip_extension(relative_path);
        if stripped != relative_path {
            self.map.entry(stripped.to_string()).or_insert(idx);
        }

        if stem.eq_ignore_ascii_case("index") && !dir.is_empty() {
            self.map.entry(dir.to_string()).or_insert(idx);
        }
    }

    /// Probe the candidate sequence: exact, extension-stripped, known
    /// extensions appended, then index-file forms.
    pub fn probe(&self, candidate: &str) -> Option<NodeIndex> {
        if let Some(&idx) = self.map.get(candidate) {
            return Some(idx);
        }

        let stripped = strip_extension(candidate);
        if stripped != candidate {
            if let Some(&idx) = self.map.get(stripped) {
                return Some(idx);
            }
        }

        for ext in PROBE_EXTENSIONS {
            if let Some(&idx) = self.map.get(&format!("{candidate}{ext}")) {
                return Some(idx);
            }
        }

        for suffix in INDEX_SUFFIXES {
            if let Some(&idx) = self.map.get(&format!("{candidate}{suffix}")) {
                return Some(idx);
            }
        }

        None
    }
}

/// Compute the root-relative candidate path for a non-external import,
/// or `None` when the source has no path form (e.g. `from . import X`,
/// which the builder resolves per imported name instead).
pub fn candidate_for(record: &ImportRecord, file_dir: &str) -> Option<String> {
    match record.kind {
        ImportKind::PythonImport | ImportKind::PythonFrom => {
            python_candidate(&record.source, file_dir)
        }
        _ => {
            let source = record.source.as_str();
            if let Some(absolute) = source.strip_prefix('/') {
                Some(normalize(absolute))
            } else if source.starts_with('.') {
                Some(normalize(&join(file_dir, source)))
            } else {
                Some(normalize(source))
            }
        }
    }
}

/// Base directory for a dots-only Python source (`.` → the file's own
/// directory, each extra dot one level up). Used by the builder to
/// resolve `from . import X` per name.
pub fn python_package_dir(source: &str, file_dir: &str) -> Option<String> {
    if source.is_empty() || !source.chars().all(|c| c == '.') {
        return None;
    }
    Some(ascend(file_dir, source.len() - 1))
}

/// Translate a dotted Python module path into a slash candidate.
fn python_candidate(source: &str, file_dir: &str) -> Option<String> {
    if source.chars().all(|c| c == '.') {
        // No module segments; the relation targets names, not a path.
        return None;
    }

    if let Some(stripped) = source.strip_prefix('.') {
        let dots = source.len() - source.trim_start_matches('.').len();
        let base = ascend(file_dir, dots - 1);
        let rest = stripped.trim_start_matches('.').replace('.', "/");
        Some(normalize(&join(&base, &rest)))
    } else {
        Some(source.replace('.', "/"))
    }
}

/// Directory `levels` parents above `dir`.
fn ascend(dir: &str, levels: usize) -> String {
    let mut parts: Vec<&str> = if dir.is_empty() {
        Vec::new()
    } else {
        dir.split('/').collect()
    };
    for _ in 0..levels {
        parts.pop();
    }
    parts.join("/")
}

fn join(dir: &str, rest: &str) -> String {
    if dir.is_empty() {
        rest.to_string()
    } else if rest.is_empty() {
        dir.to_string()
    } else {
        format!("{dir}/{rest}")
    }
}

/// Collapse `.` and `..` segments into a clean forward-slash path.
pub fn normalize(path: &str) -> String {
    let mut out: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out.join("/")
}

/// External package name: scoped packages keep their first two slash
/// segments, everything else its first.
pub fn package_name(source: &str) -> String {
    let mut segments = source.split('/');
    let first = segments.next().unwrap_or(source);
    if source.starts_with('@') {
        match segments.next() {
            Some(second) => format!("{first}/{second}"),
            None => first.to_string(),
        }
    } else {
        first.to_string()
    }
}

fn strip_extension(path: &str) -> &str {
    let base_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[base_start..].rfind('.') {
        Some(rel_idx) if rel_idx > 0 => &path[..base_start + rel_idx],
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::SmallVec;

    fn record(source: &str, kind: ImportKind) -> ImportRecord {
        ImportRecord {
            source: source.to_string(),
            kind,
            names: SmallVec::new(),
            is_relative: source.starts_with('.'),
            is_external: false,
            line: 1,
        }
    }

    #[test]
    fn normalize_collapses_dot_segments() {
        assert_eq!(normalize("src/./a/../b"), "src/b");
        assert_eq!(normalize("./x"), "x");
        assert_eq!(normalize("a/b/../../c"), "c");
    }

    #[test]
    fn relative_js_candidate_joins_file_dir() {
        let rec = record("../util/log", ImportKind::Es6Named);
        assert_eq!(
            candidate_for(&rec, "src/app").as_deref(),
            Some("src/util/log")
        );
    }

    #[test]
    fn root_relative_candidate_passes_through() {
        let rec = record("src/shared/types", ImportKind::Es6Named);
        assert_eq!(
            candidate_for(&rec, "anything").as_deref(),
            Some("src/shared/types")
        );
    }

    #[test]
    fn python_dotted_paths() {
        let rec = record(".models", ImportKind::PythonFrom);
        assert_eq!(candidate_for(&rec, "pkg").as_deref(), Some("pkg/models"));

        let rec = record("..shared.database", ImportKind::PythonFrom);
        assert_eq!(
            candidate_for(&rec, "app/services").as_deref(),
            Some("app/shared/database")
        );

        let rec = record("app.models.user", ImportKind::PythonImport);
        assert_eq!(
            candidate_for(&rec, "anywhere").as_deref(),
            Some("app/models/user")
        );
    }

    #[test]
    fn dots_only_source_has_no_candidate() {
        let rec = record(".", ImportKind::PythonFrom);
        assert_eq!(candidate_for(&rec, "pkg"), None);
        assert_eq!(python_package_dir(".", "pkg").as_deref(), Some("pkg"));
        assert_eq!(python_package_dir("..", "a/b").as_deref(), Some("a"));
    }

    #[test]
    fn scoped_package_names_keep_two_segments() {
        assert_eq!(package_name("@scope/pkg/sub"), "@scope/pkg");
        assert_eq!(package_name("lodash/fp"), "lodash");
        assert_eq!(package_name("lodash"), "lodash");
    }

    #[test]
    fn lookup_probes_in_order() {
        let mut table = LookupTable::new();
        table.insert("src/b.ts", "b", "src", NodeIndex::new(0));
        table.insert("src/widgets/index.ts", "index", "src/widgets", NodeIndex::new(1));

        assert_eq!(table.probe("src/b.ts"), Some(NodeIndex::new(0)));
        assert_eq!(table.probe("src/b"), Some(NodeIndex::new(0)));
        assert_eq!(table.probe("src/widgets"), Some(NodeIndex::new(1)));
        assert_eq!(table.probe("src/widgets/index"), Some(NodeIndex::new(1)));
        assert_eq!(table.probe("src/missing"), None);
    }
}
