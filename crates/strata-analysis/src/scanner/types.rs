//! Scanner types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Language;

/// A discovered source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Root-relative path, forward-slash normalized.
    pub relative_path: String,
    /// File size in bytes.
    pub size: u64,
    /// Detected language.
    pub language: Language,
}

impl SourceFile {
    /// The file's directory as a root-relative forward-slash path.
    /// Empty string for files directly under the root.
    pub fn relative_dir(&self) -> &str {
        match self.relative_path.rfind('/') {
            Some(idx) => &self.relative_path[..idx],
            None => "",
        }
    }

    /// Basename without extension.
    pub fn stem(&self) -> &str {
        let base = self
            .relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path);
        match base.rfind('.') {
            Some(idx) if idx > 0 => &base[..idx],
            _ => base,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(rel: &str) -> SourceFile {
        SourceFile {
            path: PathBuf::from(format!("/project/{rel}")),
            relative_path: rel.to_string(),
            size: 0,
            language: Language::TypeScript,
        }
    }

    #[test]
    fn relative_dir_and_stem() {
        let f = file("src/utils/helpers.ts");
        assert_eq!(f.relative_dir(), "src/utils");
        assert_eq!(f.stem(), "helpers");

        let root = file("main.ts");
        assert_eq!(root.relative_dir(), "");
        assert_eq!(root.stem(), "main");
    }

    #[test]
    fn stem_keeps_leading_dot() {
        let f = file("src/.env.ts");
        assert_eq!(f.stem(), ".env");
    }
}
