//! Conversion pipeline.

use std::sync::Arc;

use mdstyle_cache::{StylesheetCache, StylesheetFetcher};
use mdstyle_renderer::{
    DiagramRenderer, FrontMatter, Highlighter, MarkdownRenderer, RenderOptions,
    SyntectHighlighter, assemble, export_html, parser_options, split_front_matter,
};
use mdstyle_theme::{StyleMap, Theme, compile, css_to_rules};
use pulldown_cmark::Parser;

/// Document rendered by [`Converter::preview`].
pub const PREVIEW_TEMPLATE: &str = include_str!("../templates/preview.md");

/// Stylesheet cache over any fetcher, shareable between converters.
pub type SharedStylesheetCache = StylesheetCache<Box<dyn StylesheetFetcher>>;

/// Conversion error.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("markdown input is empty")]
    EmptyInput,
}

/// Result of a conversion.
#[derive(Clone, Debug)]
pub struct Conversion {
    /// Standalone HTML document.
    pub html: String,
    /// Attributes from the leading YAML block, if any.
    pub front_matter: FrontMatter,
    /// Non-fatal rendering problems.
    pub warnings: Vec<String>,
}

/// Markdown to inline-styled HTML converter.
///
/// Holds the long-lived collaborators; everything derived from
/// [`RenderOptions`] is rebuilt on every call, so one converter can serve
/// concurrent conversions with different options.
#[derive(Clone)]
pub struct Converter {
    highlighter: Arc<dyn Highlighter>,
    diagrams: Option<Arc<dyn DiagramRenderer>>,
    stylesheets: Arc<SharedStylesheetCache>,
}

impl Converter {
    /// Create a converter using `stylesheets` for code theme CSS.
    ///
    /// Code is highlighted with [`SyntectHighlighter`]; `mermaid` fences are
    /// left for client-side rendering until [`with_diagrams`](Self::with_diagrams).
    #[must_use]
    pub fn new(stylesheets: Arc<SharedStylesheetCache>) -> Self {
        Self {
            highlighter: Arc::new(SyntectHighlighter::new()),
            diagrams: None,
            stylesheets,
        }
    }

    #[must_use]
    pub fn with_highlighter(mut self, highlighter: Arc<dyn Highlighter>) -> Self {
        self.highlighter = highlighter;
        self
    }

    #[must_use]
    pub fn with_diagrams(mut self, diagrams: Arc<dyn DiagramRenderer>) -> Self {
        self.diagrams = Some(diagrams);
        self
    }

    /// Convert `markdown` into a standalone HTML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::EmptyInput`] if `markdown` is blank.
    pub fn convert(
        &self,
        markdown: &str,
        options: &RenderOptions,
    ) -> Result<Conversion, ConvertError> {
        if markdown.trim().is_empty() {
            return Err(ConvertError::EmptyInput);
        }

        let (front_matter, body) = split_front_matter(markdown);
        let styles = compile_styles(options);

        let mut renderer = MarkdownRenderer::new(&styles)
            .with_highlighter(self.highlighter.as_ref())
            .with_legend(options.legend)
            .with_citations(options.citations_enabled)
            .with_footnote_heading(&options.footnote_heading);
        if let Some(diagrams) = &self.diagrams {
            renderer = renderer.with_diagrams(diagrams.as_ref());
        }
        let result = renderer.render(Parser::new_ext(body, parser_options()));

        let content = assemble(&result, &styles, options.mac_code_blocks);
        let stylesheet = self.stylesheets.get_or_fetch(&options.code_theme_id);
        let html = export_html(&content, &options.primary_color, &stylesheet);

        tracing::debug!(
            theme = %options.theme,
            code_theme = %options.code_theme_id,
            bytes = html.len(),
            warnings = result.warnings.len(),
            "Converted markdown"
        );

        Ok(Conversion {
            html,
            front_matter,
            warnings: result.warnings,
        })
    }

    /// Convert the built-in preview document.
    pub fn preview(&self, options: &RenderOptions) -> Result<Conversion, ConvertError> {
        self.convert(PREVIEW_TEMPLATE, options)
    }

    /// Warm the stylesheet cache. Returns whether the stylesheet is cached.
    pub fn prefetch(&self, code_theme_id: &str) -> bool {
        self.stylesheets.prefetch(code_theme_id)
    }
}

/// Compile the selected theme, with the user's CSS layered over it.
fn compile_styles(options: &RenderOptions) -> StyleMap {
    let theme = Theme::builtin(options.theme);
    let params = options.theme_params();
    match options.custom_css.as_deref() {
        Some(css) if !css.trim().is_empty() => {
            compile(&theme.with_overrides(&css_to_rules(css)), &params)
        }
        _ => compile(theme, &params),
    }
}
