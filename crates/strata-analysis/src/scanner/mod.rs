//! Scanner — file discovery with extension and ignore filtering.
//!
//! The entry point to the pipeline. Walks the project root without
//! following symlinks, keeps files whose extension is configured, drops
//! anything matched by the built-in or user ignore patterns, and returns
//! the survivors sorted by relative path.

mod ignores;
mod language_detect;
mod types;
mod walker;

pub use ignores::{IgnoreFilter, DEFAULT_IGNORE_DIRS};
pub use language_detect::Language;
pub use types::SourceFile;
pub use walker::Scanner;
