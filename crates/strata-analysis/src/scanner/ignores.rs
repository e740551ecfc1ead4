//! Ignore filtering for the scanner.
//!
//! Two mechanisms stack: a built-in list of directory names that are never
//! descended into (dependency trees, build output, VCS metadata), and the
//! user's glob patterns from the project config, matched against
//! root-relative paths.

use strata_core::glob::GlobPattern;

/// Directory names pruned from the walk regardless of configuration.
pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
    // Package managers
    "node_modules",
    ".pnpm",
    ".yarn",
    "bower_components",
    // Python
    "__pycache__",
    ".venv",
    "venv",
    "site-packages",
    ".eggs",
    // JVM / Go / Rust build trees
    "target",
    ".gradle",
    "bin",
    "obj",
    "vendor",
    // Version control
    ".git",
    ".svn",
    ".hg",
    // IDE
    ".idea",
    ".vscode",
    // Build outputs
    "dist",
    "build",
    "out",
    "output",
    ".next",
    ".nuxt",
    ".turbo",
    // Coverage / caches
    "coverage",
    ".nyc_output",
    ".cache",
    "__snapshots__",
    // Temp
    "tmp",
    ".tmp",
];

/// Compiled ignore filter: built-in directory names plus user globs.
pub struct IgnoreFilter {
    globs: Vec<GlobPattern>,
}

impl IgnoreFilter {
    /// Compile the user's ignore patterns. Patterns that fail to compile
    /// are dropped with a warning; filtering is best-effort by design.
    pub fn new(patterns: &[String]) -> Self {
        let globs = patterns
            .iter()
            .filter_map(|p| match GlobPattern::new(p) {
                Ok(g) => Some(g),
                Err(e) => {
                    tracing::warn!(pattern = %p, error = %e, "skipping unusable ignore pattern");
                    None
                }
            })
            .collect();
        Self { globs }
    }

    /// True when a directory should be pruned from the walk.
    pub fn is_ignored_dir(&self, name: &str, relative_path: &str) -> bool {
        DEFAULT_IGNORE_DIRS.contains(&name) || self.matches(relative_path)
    }

    /// True when a file's relative path matches a user ignore glob.
    pub fn is_ignored_file(&self, relative_path: &str) -> bool {
        self.matches(relative_path)
    }

    fn matches(&self, relative_path: &str) -> bool {
        self.globs.iter().any(|g| g.matches(relative_path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_dirs_are_pruned() {
        let filter = IgnoreFilter::new(&[]);
        assert!(filter.is_ignored_dir("node_modules", "node_modules"));
        assert!(filter.is_ignored_dir("node_modules", "packages/a/node_modules"));
        assert!(!filter.is_ignored_dir("src", "src"));
    }

    #[test]
    fn user_globs_apply_to_files() {
        let filter = IgnoreFilter::new(&["**/*.test.ts".to_string(), "legacy/**".to_string()]);
        assert!(filter.is_ignored_file("src/app.test.ts"));
        assert!(filter.is_ignored_file("legacy/old.ts"));
        assert!(!filter.is_ignored_file("src/app.ts"));
    }

    #[test]
    fn single_star_globs_stay_in_one_directory() {
        let filter = IgnoreFilter::new(&["src/*.ts".to_string()]);
        assert!(filter.is_ignored_file("src/a.ts"));
        assert!(!filter.is_ignored_file("src/nested/a.ts"));
    }
}
