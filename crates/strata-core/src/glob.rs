//! Glob matching for ignore filters and grouping rules.
//!
//! The dialect is deliberately small: `*` matches any run of non-slash
//! characters, `**` matches any run including slashes, and every other
//! character is literal (`.` does not need escaping by the pattern author).
//! Unanchored patterns are anchored by convention: a pattern that does not
//! start with `**` is anchored at the start, and one that does not end with
//! `*` or `**` is anchored at the end.

use regex::Regex;

use crate::errors::ConfigError;

/// Translate a glob pattern into an unanchored regex source string.
///
/// Grouping rules reuse this and apply their own anchoring and case
/// handling on top.
pub fn to_regex_source(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    let bytes = pattern.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        match c {
            '*' => {
                if bytes.get(i + 1) == Some(&b'*') {
                    out.push_str(".*");
                    i += 2;
                    continue;
                }
                out.push_str("[^/]*");
            }
            '.' | '+' | '(' | ')' | '[' | ']' | '{' | '}' | '^' | '$' | '|' | '?' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
        i += 1;
    }
    out
}

/// A compiled glob pattern matched against forward-slash relative paths.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    raw: String,
    regex: Regex,
}

impl GlobPattern {
    /// Compile a pattern with the conventional anchoring described in the
    /// module docs.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let mut source = String::new();
        if !pattern.starts_with("**") {
            source.push('^');
        }
        source.push_str(&to_regex_source(pattern));
        if !pattern.ends_with('*') {
            source.push('$');
        }

        let regex = Regex::new(&source).map_err(|e| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            regex,
        })
    }

    /// The original pattern text.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Test a forward-slash relative path against this pattern.
    pub fn matches(&self, relative_path: &str) -> bool {
        self.regex.is_match(relative_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_does_not_cross_slashes() {
        let p = GlobPattern::new("src/*.ts").unwrap();
        assert!(p.matches("src/main.ts"));
        assert!(!p.matches("src/sub/main.ts"));
    }

    #[test]
    fn double_star_crosses_slashes() {
        let p = GlobPattern::new("**/*.test.ts").unwrap();
        assert!(p.matches("src/deep/nested/a.test.ts"));
        assert!(!p.matches("src/a.ts"));
    }

    #[test]
    fn dot_is_literal() {
        let p = GlobPattern::new("*.min.js").unwrap();
        assert!(p.matches("bundle.min.js"));
        assert!(!p.matches("bundleXminXjs"));
    }

    #[test]
    fn trailing_star_leaves_end_open() {
        let p = GlobPattern::new("dist/**").unwrap();
        assert!(p.matches("dist/assets/app.js"));
        assert!(!p.matches("src/dist.ts"));
    }

    #[test]
    fn exact_pattern_is_fully_anchored() {
        let p = GlobPattern::new("vendor/lib.js").unwrap();
        assert!(p.matches("vendor/lib.js"));
        assert!(!p.matches("sub/vendor/lib.js"));
        assert!(!p.matches("vendor/lib.js.bak"));
    }

    #[test]
    fn regex_metacharacters_are_escaped() {
        let p = GlobPattern::new("src/(a|b)?.ts").unwrap();
        assert!(p.matches("src/(a|b)?.ts"));
        assert!(!p.matches("src/a.ts"));
    }
}
