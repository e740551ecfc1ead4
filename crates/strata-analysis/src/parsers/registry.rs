//! Parser registry and dispatch.

use std::path::Path;

use strata_core::errors::ParseError;

use super::go::GoParser;
use super::java::JavaParser;
use super::python::PythonParser;
use super::traits::LanguageParser;
use super::typescript::TypeScriptParser;

/// Holds every available language parser and dispatches by extension.
#[derive(Debug)]
pub struct ParserRegistry {
    parsers: Vec<Box<dyn LanguageParser>>,
}

impl ParserRegistry {
    /// Build the registry for a set of configured extensions
    /// (lowercase, dot-prefixed).
    ///
    /// Fatal when no parser covers any configured extension: an analysis
    /// run that could never parse anything is a misconfiguration, not an
    /// empty result.
    pub fn for_extensions(extensions: &[String]) -> Result<Self, ParseError> {
        let parsers: Vec<Box<dyn LanguageParser>> = vec![
            Box::new(TypeScriptParser::new()?),
            Box::new(PythonParser::new()),
            Box::new(GoParser::new()),
            Box::new(JavaParser::new()),
        ];

        let covered = extensions.iter().any(|ext| {
            let bare = ext.trim_start_matches('.');
            parsers.iter().any(|p| p.extensions().contains(&bare))
        });
        if !covered {
            return Err(ParseError::EmptyRegistry);
        }

        Ok(Self { parsers })
    }

    /// Find the parser responsible for a path, if any.
    pub fn parser_for(&self, path: &Path) -> Option<&dyn LanguageParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(path))
            .map(|p| p.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_by_extension() {
        let registry = ParserRegistry::for_extensions(&[".ts".to_string()]).unwrap();
        assert!(registry.parser_for(Path::new("a.ts")).is_some());
        assert!(registry.parser_for(Path::new("a.py")).is_some());
        assert!(registry.parser_for(Path::new("a.rb")).is_none());
    }

    #[test]
    fn unknown_extensions_alone_are_fatal() {
        let err = ParserRegistry::for_extensions(&[".rb".to_string(), ".php".to_string()])
            .unwrap_err();
        assert!(matches!(err, ParseError::EmptyRegistry));
    }
}
