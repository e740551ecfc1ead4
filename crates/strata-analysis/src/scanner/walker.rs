//! Recursive directory walker.

use std::fs;
use std::path::{Path, PathBuf};

use strata_core::errors::ScanError;
use strata_core::ProjectConfig;

use super::ignores::IgnoreFilter;
use super::types::SourceFile;
use super::Language;

/// File scanner. Walks the root, applies extension and ignore filters,
/// and returns discovered files sorted by relative path.
pub struct Scanner {
    root: PathBuf,
    extensions: Vec<String>,
    ignores: IgnoreFilter,
}

impl Scanner {
    pub fn new(root: &Path, config: &ProjectConfig) -> Self {
        Self {
            root: root.to_path_buf(),
            extensions: config.extensions.clone(),
            ignores: IgnoreFilter::new(&config.ignore),
        }
    }

    /// Walk the root and collect matching source files.
    ///
    /// A missing or unreadable root is fatal; unreadable subdirectories
    /// are skipped with a debug log. Zero matches is not an error.
    pub fn scan(&self) -> Result<Vec<SourceFile>, ScanError> {
        let meta = fs::metadata(&self.root).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ScanError::RootNotFound {
                    path: self.root.display().to_string(),
                }
            } else {
                ScanError::RootUnreadable {
                    path: self.root.display().to_string(),
                    source,
                }
            }
        })?;
        if !meta.is_dir() {
            return Err(ScanError::RootNotDirectory {
                path: self.root.display().to_string(),
            });
        }

        // The root must be enumerable even if subdirectories are not.
        fs::read_dir(&self.root).map_err(|source| ScanError::RootUnreadable {
            path: self.root.display().to_string(),
            source,
        })?;

        let mut files = Vec::new();
        self.walk_dir(&self.root, &mut files);
        files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

        tracing::debug!(root = %self.root.display(), files = files.len(), "scan complete");
        Ok(files)
    }

    fn walk_dir(&self, dir: &Path, files: &mut Vec<SourceFile>) {
        let entries = match fs::read_dir(dir) {
            Ok(e) => e,
            Err(e) => {
                tracing::debug!(dir = %dir.display(), error = %e, "skipping unreadable directory");
                return;
            }
        };

        for entry in entries.flatten() {
            let path = entry.path();
            let file_type = match entry.file_type() {
                Ok(t) => t,
                Err(_) => continue,
            };
            // Symlinks are not followed.
            if file_type.is_symlink() {
                continue;
            }

            let relative = self.relative_of(&path);

            if file_type.is_dir() {
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if self.ignores.is_ignored_dir(&name, &relative) {
                    tracing::debug!(dir = %relative, "pruned ignored directory");
                    continue;
                }
                self.walk_dir(&path, files);
            } else if file_type.is_file() {
                if let Some(file) = self.consider_file(&path, relative) {
                    files.push(file);
                }
            }
        }
    }

    fn consider_file(&self, path: &Path, relative: String) -> Option<SourceFile> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        let dotted = format!(".{ext}");
        if !self.extensions.iter().any(|e| e == &dotted) {
            return None;
        }
        if self.ignores.is_ignored_file(&relative) {
            return None;
        }

        let language = Language::from_extension(&ext)?;
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);

        Some(SourceFile {
            path: path.to_path_buf(),
            relative_path: relative,
            size,
            language,
        })
    }

    fn relative_of(&self, path: &Path) -> String {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);
        let mut out = String::new();
        for component in rel.components() {
            if !out.is_empty() {
                out.push('/');
            }
            out.push_str(&component.as_os_str().to_string_lossy());
        }
        out
    }
}
