//! Standalone HTML document export.

use std::sync::LazyLock;

use mdstyle_theme::PRIMARY_COLOR_REF;
use regex::Regex;

/// Matches a primary color custom property declaration.
static PRIMARY_COLOR_DECL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"--md-primary-color:[^;"]*;\s?"#).unwrap());

/// Resolve the primary color and wrap `content` into a standalone document.
///
/// Every `var(--md-primary-color)` reference becomes `primary_color` and the
/// custom property declarations themselves are dropped. `stylesheet` (the
/// code theme) is inlined into the document head.
pub fn export_html(content: &str, primary_color: &str, stylesheet: &str) -> String {
    let resolved = content.replace(PRIMARY_COLOR_REF, primary_color);
    let resolved = PRIMARY_COLOR_DECL_RE.replace_all(&resolved, "");
    format!(
        "<html><head><meta charset=\"utf-8\" /><style>{stylesheet}</style></head>\
         <body><div style=\"width: 750px; margin: auto;\">{resolved}</div></body></html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_primary_color_resolved() {
        let html = export_html(
            r#"<h1 style="--md-primary-color: #0F4C81; border-bottom: 2px solid var(--md-primary-color); color: red">T</h1>"#,
            "#009874",
            "",
        );
        assert!(!html.contains("var(--md-primary-color)"));
        assert!(!html.contains("--md-primary-color"));
        assert!(html.contains(r#"<h1 style="border-bottom: 2px solid #009874; color: red">T</h1>"#), "{html}");
    }

    #[test]
    fn test_document_shell() {
        assert_eq!(
            export_html("<p>x</p>", "#000", ".hljs{color:red}"),
            "<html><head><meta charset=\"utf-8\" /><style>.hljs{color:red}</style></head>\
             <body><div style=\"width: 750px; margin: auto;\"><p>x</p></div></body></html>"
        );
    }

    #[test]
    fn test_unterminated_declaration_untouched() {
        let html = export_html(r#"<p style="--md-primary-color: #fff">x</p>"#, "#000", "");
        assert!(html.contains(r#"<p style="--md-primary-color: #fff">x</p>"#));
    }
}
