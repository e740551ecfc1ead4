//! Project configuration.

mod project_config;

pub use project_config::{GroupingRule, OutputConfig, ProjectConfig, DEFAULT_EXTENSIONS};
