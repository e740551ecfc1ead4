//! Layer classification rules.
//!
//! A rule is a regex over the lowercased forward-slash module path plus a
//! target layer id and an initial level. User grouping rules are
//! prepended to the built-in set at level 0, so they always outrank the
//! heuristics; within each group, first match wins.

use std::sync::LazyLock;

use regex::Regex;

use strata_core::glob::to_regex_source;
use strata_core::GroupingRule;

/// One ordered classification rule.
#[derive(Debug, Clone)]
pub struct LayerRule {
    pub regex: Regex,
    pub layer_id: String,
    pub level: i32,
}

/// Fallback level for modules no rule matches.
pub const FALLBACK_LEVEL: i32 = 99;

/// A path-segment alternation: matches a directory segment or a basename
/// before its extension.
fn segment_pattern(alternatives: &str) -> Regex {
    Regex::new(&format!(r"(?:^|/)(?:{alternatives})(?:/|\.|$)")).expect("built-in layer rule")
}

static BUILT_IN: LazyLock<Vec<LayerRule>> = LazyLock::new(|| {
    let table: &[(&str, &str, i32)] = &[
        ("frontend", "ui|views|pages|components|frontend|app", 1),
        ("api", "api|routes|controllers|handlers|endpoints", 2),
        ("services", "services|business|logic|core|domain", 3),
        ("database", "db|database|models|entities|repositories|data", 4),
        ("shared", "utils|helpers|lib|common|shared", 5),
        ("cli", "cli", 6),
        ("config", "config", 7),
        ("types", "types", 8),
    ];
    table
        .iter()
        .map(|(id, alternatives, level)| LayerRule {
            regex: segment_pattern(alternatives),
            layer_id: (*id).to_string(),
            level: *level,
        })
        .collect()
});

/// The built-in ordered rule set.
pub fn built_in_rules() -> &'static [LayerRule] {
    &BUILT_IN
}

/// Convert user grouping rules: glob → regex, case-insensitive, anchored
/// at the start, level 0. Unusable patterns are dropped with a warning.
pub fn user_rules(grouping: &[GroupingRule]) -> Vec<LayerRule> {
    grouping
        .iter()
        .filter_map(|rule| {
            let source = format!("(?i)^{}", to_regex_source(&rule.pattern));
            match Regex::new(&source) {
                Ok(regex) => Some(LayerRule {
                    regex,
                    layer_id: slug(&rule.label),
                    level: 0,
                }),
                Err(e) => {
                    tracing::warn!(
                        pattern = %rule.pattern,
                        error = %e,
                        "skipping unusable grouping rule"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Lowercase slug for a layer label: spaces and underscores to hyphens.
pub fn slug(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

/// Title-case a layer id: hyphen/underscore split, capitalized, joined
/// with spaces.
pub fn title_case(id: &str) -> String {
    id.split(['-', '_'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_match(path: &str) -> Option<String> {
        built_in_rules()
            .iter()
            .find(|r| r.regex.is_match(path))
            .map(|r| r.layer_id.clone())
    }

    #[test]
    fn built_in_segment_matching() {
        assert_eq!(first_match("src/components/button.tsx").as_deref(), Some("frontend"));
        assert_eq!(first_match("src/controllers/user.ts").as_deref(), Some("api"));
        assert_eq!(first_match("src/services/auth.ts").as_deref(), Some("services"));
        assert_eq!(first_match("src/db/models.ts").as_deref(), Some("database"));
        assert_eq!(first_match("src/utils/fmt.ts").as_deref(), Some("shared"));
        assert_eq!(first_match("src/other/misc.ts"), None);
    }

    #[test]
    fn basename_segments_match_too() {
        assert_eq!(first_match("src/app.ts").as_deref(), Some("frontend"));
        assert_eq!(first_match("src/config.ts").as_deref(), Some("config"));
    }

    #[test]
    fn rule_order_decides_overlaps() {
        // "app" (frontend) appears before "api" in the rule order, so a
        // path containing both resolves to the earlier rule.
        assert_eq!(first_match("app/api/user.ts").as_deref(), Some("frontend"));
    }

    #[test]
    fn user_rules_are_case_insensitive_prefix_globs() {
        let rules = user_rules(&[GroupingRule {
            pattern: "Packages/Web/**".to_string(),
            label: "Web Frontend".to_string(),
            color: None,
        }]);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].layer_id, "web-frontend");
        assert_eq!(rules[0].level, 0);
        assert!(rules[0].regex.is_match("packages/web/src/app.ts"));
        assert!(!rules[0].regex.is_match("other/packages/web/x.ts"));
    }

    #[test]
    fn slug_and_title_case_round_trip() {
        assert_eq!(slug("Web Frontend"), "web-frontend");
        assert_eq!(title_case("web-frontend"), "Web Frontend");
        assert_eq!(title_case("api"), "Api");
    }
}
