//! Minimal CSS ingest for user style overrides.
//!
//! Understands flat `selector, selector { prop: value; }` rules only. There is
//! no cascade, no specificity and no nesting: selectors are matched against
//! element kind names verbatim.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::theme::{PropertyMap, merge_into};

/// Selector → declarations, in selector order.
pub type CssRules = BTreeMap<String, PropertyMap>;

static COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

/// Parse CSS text into per-selector property maps.
///
/// Comments are stripped. A selector list applies the block to each
/// selector. A selector seen again merges into its earlier declarations with
/// later values winning. Declarations split at the first `:` so values like
/// `url(https://…)` survive. Text without a closing brace is ignored.
pub fn css_to_rules(css: &str) -> CssRules {
    let stripped = COMMENT_RE.replace_all(css, "");
    let mut rest = stripped.as_ref();
    let mut rules = CssRules::new();

    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}').map(|offset| open + offset) else {
            break;
        };
        let declarations = parse_declarations(&rest[open + 1..close]);
        for selector in rest[..open].split(',').map(str::trim) {
            if selector.is_empty() {
                continue;
            }
            merge_into(rules.entry(selector.to_owned()).or_default(), &declarations);
        }
        rest = &rest[close + 1..];
    }

    rules
}

fn parse_declarations(block: &str) -> PropertyMap {
    block
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            if property.is_empty() {
                return None;
            }
            Some((property.to_owned(), value.trim().to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn props(pairs: &[(&str, &str)]) -> PropertyMap {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_single_rule() {
        let rules = css_to_rules("h1 { color: red; font-size: 2em }");
        assert_eq!(
            rules.get("h1"),
            Some(&props(&[("color", "red"), ("font-size", "2em")]))
        );
    }

    #[test]
    fn test_selector_list() {
        let rules = css_to_rules("h1, h2 ,h3{margin:0}");
        assert_eq!(rules.len(), 3);
        for selector in ["h1", "h2", "h3"] {
            assert_eq!(rules.get(selector), Some(&props(&[("margin", "0")])));
        }
    }

    #[test]
    fn test_comments_are_stripped() {
        let rules = css_to_rules("/* heading */ h1 { /* color: blue; */ color: red; }\n/*\n p {} */");
        assert_eq!(rules.len(), 1);
        assert_eq!(rules.get("h1"), Some(&props(&[("color", "red")])));
    }

    #[test]
    fn test_repeated_selector_merges_last_wins() {
        let rules = css_to_rules("p { color: red; margin: 0 } p { color: blue }");
        assert_eq!(
            rules.get("p"),
            Some(&props(&[("color", "blue"), ("margin", "0")]))
        );
    }

    #[test]
    fn test_value_with_colon() {
        let rules = css_to_rules("image { background: url(https://example.com/a.png) }");
        assert_eq!(
            rules.get("image"),
            Some(&props(&[("background", "url(https://example.com/a.png)")]))
        );
    }

    #[test]
    fn test_malformed_input() {
        assert!(css_to_rules("").is_empty());
        assert!(css_to_rules("h1 { color: red").is_empty());
        assert_eq!(
            css_to_rules("p { junk; : nothing; color : red ;; }").get("p"),
            Some(&props(&[("color", "red")]))
        );
    }
}
