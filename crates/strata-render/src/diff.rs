//! Diagram change detection.
//!
//! Stores the previously emitted diagram and compares new output after
//! normalization: volatile attributes stripped, line endings unified,
//! inter-tag whitespace collapsed. Comparison is by xxh3 fingerprint of
//! the normalized text.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use xxhash_rust::xxh3::xxh3_64;

use crate::RenderError;

/// Attributes that change on every emission and must not count as diffs.
static VOLATILE_ATTRS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\s(?:modified|etag)="[^"]*""#).expect("volatile attr regex"));

static INTER_TAG_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s+<").expect("inter-tag whitespace regex"));

/// Normalize XML for comparison.
pub fn normalize_xml(xml: &str) -> String {
    let unified = xml.replace("\r\n", "\n").replace('\r', "\n");
    let stripped = VOLATILE_ATTRS.replace_all(&unified, "");
    INTER_TAG_WHITESPACE
        .replace_all(&stripped, "><")
        .trim()
        .to_string()
}

/// Fingerprint of normalized content.
pub fn fingerprint(xml: &str) -> u64 {
    xxh3_64(normalize_xml(xml).as_bytes())
}

/// On-disk cache of the previously emitted diagram.
pub struct DiagramCache {
    path: PathBuf,
}

impl DiagramCache {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// True when `new_content` differs from the cached diagram after
    /// normalization. A missing cache always counts as changed.
    pub fn is_changed(&self, new_content: &str) -> bool {
        match std::fs::read_to_string(&self.path) {
            Ok(previous) => fingerprint(&previous) != fingerprint(new_content),
            Err(_) => true,
        }
    }

    /// Store the emitted diagram for the next comparison.
    pub fn store(&self, content: &str) -> Result<(), RenderError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
