//! SVG post-processing.

use std::sync::LazyLock;

use regex::Regex;

/// Regex to match Google Fonts @import statements in SVG style blocks.
static GOOGLE_FONTS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@import\s+url\([^)]*fonts\.googleapis\.com[^)]*\)\s*;?").unwrap()
});

/// Regex to match an existing id on the root `<svg>` element.
static SVG_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(<svg\b[^>]*?\s)id="([^"]*)""#).unwrap());

/// Strip Google Fonts @import from SVG to avoid external requests.
#[must_use]
pub fn strip_google_fonts_import(svg: &str) -> String {
    GOOGLE_FONTS_RE.replace_all(svg, "").to_string()
}

/// Give the root `<svg>` element the id `id`, replacing any existing one.
///
/// Mermaid scopes its embedded style rules to the root id, so `#old`
/// selectors are rewritten to `#id` as well. Anything before the root
/// element (XML declaration, comments) is dropped. Returns `None` when there
/// is no `<svg` element.
pub fn with_svg_id(svg: &str, id: &str) -> Option<String> {
    let start = svg.find("<svg")?;
    let svg = &svg[start..];
    let Some(caps) = SVG_ID_RE.captures(svg) else {
        return Some(format!(r#"<svg id="{id}"{}"#, &svg["<svg".len()..]));
    };

    let old_id = caps.get(2).map_or("", |m| m.as_str());
    let renamed = SVG_ID_RE
        .replace(svg, format!(r#"${{1}}id="{id}""#))
        .into_owned();
    if old_id.is_empty() || old_id == id {
        return Some(renamed);
    }

    // Only whole ids: `#container` but not `#container-inner`
    let selector = Regex::new(&format!(r"#{}([^\w-]|$)", regex::escape(old_id))).ok()?;
    Some(
        selector
            .replace_all(&renamed, format!("#{id}${{1}}"))
            .into_owned(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_with_svg_id_inserts() {
        assert_eq!(
            with_svg_id(r#"<svg width="10"><g/></svg>"#, "mermaid-diagram-0").unwrap(),
            r#"<svg id="mermaid-diagram-0" width="10"><g/></svg>"#
        );
    }

    #[test]
    fn test_with_svg_id_replaces_existing() {
        assert_eq!(
            with_svg_id(
                r#"<?xml version="1.0"?><svg xmlns="http://www.w3.org/2000/svg" id="kroki"><g id="x"/></svg>"#,
                "mermaid-diagram-3"
            )
            .unwrap(),
            r#"<svg xmlns="http://www.w3.org/2000/svg" id="mermaid-diagram-3"><g id="x"/></svg>"#
        );
    }

    #[test]
    fn test_with_svg_id_rewrites_scoped_styles() {
        let svg = r#"<svg id="container"><style>#container .node rect{fill:#ECECFF}#container-inner{x:1}</style><g class="node"/></svg>"#;
        assert_eq!(
            with_svg_id(svg, "mermaid-diagram-0").unwrap(),
            r#"<svg id="mermaid-diagram-0"><style>#mermaid-diagram-0 .node rect{fill:#ECECFF}#container-inner{x:1}</style><g class="node"/></svg>"#
        );
    }

    #[test]
    fn test_with_svg_id_requires_svg() {
        assert_eq!(with_svg_id("<html></html>", "x"), None);
    }

    #[test]
    fn test_strip_google_fonts_import() {
        let svg = "<svg><style>@import url('https://fonts.googleapis.com/css?family=Roboto');.a{}</style></svg>";
        assert_eq!(
            strip_google_fonts_import(svg),
            "<svg><style>.a{}</style></svg>"
        );
    }
}
