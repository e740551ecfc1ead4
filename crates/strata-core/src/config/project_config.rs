//! `ProjectConfig` — the resolved configuration handed to the pipeline.
//!
//! The analysis engine never reads config files itself; the CLI (or any
//! other host) loads `strata.toml` via [`ProjectConfig::load`] and passes
//! the value in. Normalization happens once, at load time.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Extensions analyzed when the config does not list any.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    ".ts", ".tsx", ".js", ".jsx", ".mjs", ".cjs", ".mts", ".cts", ".py", ".pyw", ".pyi", ".go",
    ".java",
];

/// A user-supplied grouping rule. Rules are ordered; the first matching
/// rule wins, and user rules outrank the built-in layer heuristics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingRule {
    /// Glob pattern matched against the module's relative path.
    pub pattern: String,
    /// Layer label shown in the diagram.
    pub label: String,
    /// Optional `#RRGGBB` color for the layer.
    pub color: Option<String>,
}

/// Output settings. The analysis engine passes these through untouched;
/// only the emitters and the CLI consume them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: String,
    pub filename: String,
    pub formats: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "./architecture".to_string(),
            filename: "architecture".to_string(),
            formats: vec!["drawio".to_string()],
        }
    }
}

/// Resolved project configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProjectConfig {
    /// Glob patterns excluded from the scan, in addition to the built-in
    /// ignore list.
    pub ignore: Vec<String>,
    /// Ordered grouping rules, applied before the built-in layer rules.
    pub grouping: Vec<GroupingRule>,
    /// Layer id → `#RRGGBB` color overrides.
    pub styles: HashMap<String, String>,
    /// File extensions to analyze. Entries missing the leading `.` are
    /// normalized. Empty means [`DEFAULT_EXTENSIONS`].
    pub extensions: Vec<String>,
    /// Output settings, passed through to the emitters.
    pub output: OutputConfig,
}

impl ProjectConfig {
    /// Load and normalize a configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut config: ProjectConfig =
            toml::from_str(&text).map_err(|e| ConfigError::Parse {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        config.normalize();
        Ok(config)
    }

    /// Normalize in place: dot-prefix extensions, fill in defaults, and
    /// drop invalid style entries with a warning.
    pub fn normalize(&mut self) {
        if self.extensions.is_empty() {
            self.extensions = DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect();
        }
        for ext in &mut self.extensions {
            *ext = ext.to_lowercase();
            if !ext.starts_with('.') {
                ext.insert(0, '.');
            }
        }

        self.styles.retain(|layer, color| {
            if is_hex_color(color) {
                true
            } else {
                tracing::warn!(layer = %layer, color = %color, "ignoring invalid style color");
                false
            }
        });

        for rule in &mut self.grouping {
            if let Some(color) = &rule.color {
                if !is_hex_color(color) {
                    tracing::warn!(
                        pattern = %rule.pattern,
                        color = %color,
                        "ignoring invalid grouping color"
                    );
                    rule.color = None;
                }
            }
        }
    }

    /// True when `ext` (lowercase, dot-prefixed) is configured for analysis.
    pub fn includes_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

/// Validate a `#RRGGBB` color string.
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 7
        && s.starts_with('#')
        && s[1..].chars().all(|c| c.is_ascii_hexdigit())
}
