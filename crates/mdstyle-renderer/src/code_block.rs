//! Fenced code block formatting.
//!
//! Highlighted code is flattened so that it survives editors that collapse
//! whitespace: tabs become four spaces, line breaks become `<br/>` and every
//! whitespace character outside of tags becomes `&nbsp;`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Fence language prefix routed to the diagram renderer.
pub const DIAGRAM_LANGUAGE: &str = "mermaid";

/// Window-dots marker shown on code blocks in mac style.
pub const MAC_SIGN_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" x="0px" y="0px" width="45px" height="13px" viewBox="0 0 450 130">"#,
    r#"<ellipse cx="50" cy="65" rx="50" ry="52" stroke="rgb(220,60,54)" stroke-width="2" fill="rgb(237,108,96)" />"#,
    r#"<ellipse cx="225" cy="65" rx="50" ry="52" stroke="rgb(218,151,33)" stroke-width="2" fill="rgb(247,193,81)" />"#,
    r#"<ellipse cx="400" cy="65" rx="50" ry="52" stroke="rgb(27,161,37)" stroke-width="2" fill="rgb(100,200,86)" />"#,
    "</svg>"
);

static TEXT_RUN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(>[^<]+)|(^[^<]+)").unwrap());

/// Whether a fence info string selects the diagram renderer.
pub fn is_diagram(info: &str) -> bool {
    info.starts_with(DIAGRAM_LANGUAGE)
}

/// Highlighter language token: the first word of the fence info string.
pub fn language_token(info: &str) -> &str {
    info.split_whitespace().next().unwrap_or("")
}

/// Flatten highlighted HTML into a single line.
pub fn flatten_highlighted(html: &str) -> String {
    let html = html
        .replace('\t', "    ")
        .replace("\r\n", "<br/>")
        .replace('\n', "<br/>");
    TEXT_RUN_RE
        .replace_all(&html, |caps: &Captures<'_>| {
            caps[0]
                .chars()
                .map(|c| {
                    if c.is_whitespace() {
                        "&nbsp;".to_owned()
                    } else {
                        c.to_string()
                    }
                })
                .collect::<String>()
        })
        .into_owned()
}

/// Window-dots marker element. Hidden unless the mac style sheet is present.
pub fn mac_sign() -> String {
    format!(r#"<span class="mac-sign" style="padding: 10px 14px 0;" hidden>{MAC_SIGN_SVG}</span>"#)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_is_diagram() {
        assert!(is_diagram("mermaid"));
        assert!(is_diagram("mermaid theme=dark"));
        assert!(!is_diagram("rust"));
        assert!(!is_diagram(""));
    }

    #[test]
    fn test_language_token() {
        assert_eq!(language_token("rust ignore"), "rust");
        assert_eq!(language_token(""), "");
    }

    #[test]
    fn test_flatten_plain_text() {
        assert_eq!(flatten_highlighted("a b\n\tc"), "a&nbsp;b<br/>&nbsp;&nbsp;&nbsp;&nbsp;c");
    }

    #[test]
    fn test_flatten_keeps_tag_whitespace() {
        assert_eq!(
            flatten_highlighted(r#"<span class="hljs-keyword">let</span> x = 1;"#),
            r#"<span class="hljs-keyword">let</span>&nbsp;x&nbsp;=&nbsp;1;"#
        );
    }

    #[test]
    fn test_flatten_windows_newlines() {
        assert_eq!(flatten_highlighted("a\r\nb"), "a<br/>b");
    }
}
