//! strata-core: shared foundation for the strata workspace.
//!
//! Holds the pieces every other crate needs:
//! - Configuration: `ProjectConfig` and its TOML loader
//! - Errors: one enum per subsystem, `thiserror` only, zero `anyhow`
//! - Glob matching: the pattern dialect used by ignore filters and
//!   grouping rules

pub mod config;
pub mod errors;
pub mod glob;

pub use config::{GroupingRule, OutputConfig, ProjectConfig};
pub use errors::{ConfigError, ParseError, PipelineError, ScanError};
pub use glob::GlobPattern;
