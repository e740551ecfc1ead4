//! Parser subsystem — per-language import/export extraction.
//!
//! The ECMAScript family goes through tree-sitter grammars with error
//! recovery; Python, Go, and Java use line-oriented lexical passes over
//! comment/string-stripped content. Every parser upholds the same
//! contract: never fail on malformed input, record problems as strings,
//! and report whatever was recovered.

pub mod go;
pub mod java;
pub mod python;
pub mod registry;
pub mod strip;
pub mod traits;
pub mod types;
pub mod typescript;

pub use registry::ParserRegistry;
pub use traits::LanguageParser;
pub use types::{ImportKind, ImportRecord, ParsedFile};
