//! Syntax highlighting for fenced code blocks.
//!
//! Output uses highlight.js class names (`hljs-*`) so that a highlight.js
//! theme stylesheet can be inlined by the exporter.

use std::sync::LazyLock;

use syntect::html::{ClassStyle, ClassedHTMLGenerator};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::state::escape_html;

/// Error from a [`Highlighter`].
#[derive(Debug, thiserror::Error)]
#[error("Failed to highlight {language} code: {message}")]
pub struct HighlightError {
    pub language: String,
    pub message: String,
}

/// Turns code into highlighted HTML.
pub trait Highlighter: Send + Sync {
    /// Highlight `code` written in `language`.
    ///
    /// Unknown languages must be treated as plain text rather than reported
    /// as errors. The returned HTML must contain the code's text escaped,
    /// with no extra leading or trailing line breaks.
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError>;
}

/// Highlighter that only escapes code.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str, _language: &str) -> Result<String, HighlightError> {
        Ok(escape_html(code))
    }
}

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);

/// [`Highlighter`] backed by syntect's bundled grammars.
#[derive(Clone, Copy, Debug)]
pub struct SyntectHighlighter {
    class_style: ClassStyle,
}

impl Default for SyntectHighlighter {
    fn default() -> Self {
        Self {
            class_style: ClassStyle::SpacedPrefixed { prefix: "hljs-" },
        }
    }
}

impl SyntectHighlighter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, code: &str, language: &str) -> Result<String, HighlightError> {
        let syntax_set = &*SYNTAX_SET;
        let syntax =
            find_syntax(syntax_set, language).unwrap_or_else(|| syntax_set.find_syntax_plain_text());

        let added_newline = !code.ends_with('\n');
        let mut source = code.to_owned();
        if added_newline {
            source.push('\n');
        }

        let mut generator =
            ClassedHTMLGenerator::new_with_class_style(syntax, syntax_set, self.class_style);
        for line in LinesWithEndings::from(source.as_str()) {
            generator
                .parse_html_for_line_which_includes_newline(line)
                .map_err(|err| HighlightError {
                    language: language.to_owned(),
                    message: err.to_string(),
                })?;
        }

        let mut html = generator.finalize();
        // Only closing tags can follow the newline appended above.
        if added_newline && let Some(pos) = html.rfind('\n') {
            html.remove(pos);
        }
        Ok(html)
    }
}

fn find_syntax<'a>(syntax_set: &'a SyntaxSet, token: &str) -> Option<&'a SyntaxReference> {
    if token.is_empty() {
        return None;
    }
    let lowercase = token.to_ascii_lowercase();
    syntax_set
        .find_syntax_by_token(&lowercase)
        .or_else(|| syntax_set.find_syntax_by_name(&lowercase))
        .or_else(|| syntax_set.find_syntax_by_extension(&lowercase))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_highlighter_escapes() {
        assert_eq!(
            PlainHighlighter.highlight("a < b", "rust").unwrap(),
            "a &lt; b"
        );
    }

    #[test]
    fn test_syntect_emits_hljs_classes() {
        let html = SyntectHighlighter::new()
            .highlight("fn main() {}", "rust")
            .unwrap();
        assert!(html.contains("hljs-"), "{html}");
        assert!(html.contains("main"));
        assert!(!html.contains('\n'));
    }

    #[test]
    fn test_syntect_unknown_language_is_plain_text() {
        let html = SyntectHighlighter::new()
            .highlight("x <y>", "no-such-language")
            .unwrap();
        assert!(html.contains("x &lt;y&gt;"), "{html}");
    }

    #[test]
    fn test_syntect_keeps_interior_newlines() {
        let html = SyntectHighlighter::new()
            .highlight("a\nb", "")
            .unwrap();
        assert_eq!(html.matches('\n').count(), 1);
    }
}
