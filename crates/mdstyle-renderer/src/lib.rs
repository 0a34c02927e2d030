//! Markdown renderer producing HTML with every theme style inlined.
//!
//! Output is meant for platforms that strip `<style>` blocks and external
//! stylesheets: each element carries a `style` attribute resolved from a
//! compiled [`StyleMap`](mdstyle_theme::StyleMap).
//!
//! The pipeline is:
//! 1. [`split_front_matter`] removes a leading YAML block.
//! 2. [`MarkdownRenderer`] walks pulldown-cmark events into styled HTML,
//!    delegating code to a [`Highlighter`] and `mermaid` fences to a
//!    [`DiagramRenderer`].
//! 3. [`assemble`] wraps the body into the styled container.
//! 4. [`export_html`] resolves the primary color and builds the final
//!    document.
//!
//! # Example
//!
//! ```
//! use mdstyle_renderer::{MarkdownRenderer, RenderOptions, parser_options};
//! use mdstyle_theme::{Theme, compile};
//! use pulldown_cmark::Parser;
//!
//! let options = RenderOptions::default();
//! let styles = compile(Theme::builtin(options.theme), &options.theme_params());
//! let result = MarkdownRenderer::new(&styles)
//!     .render(Parser::new_ext("# Hello", parser_options()));
//! assert!(result.html.starts_with("<h1 style="));
//! ```

mod code_block;
mod diagram;
mod document;
mod export;
mod footnotes;
mod front_matter;
mod highlight;
mod options;
mod renderer;
mod state;
mod util;

use pulldown_cmark::Options;

pub use code_block::{DIAGRAM_LANGUAGE, MAC_SIGN_SVG};
pub use diagram::{DiagramError, DiagramErrorKind, DiagramRenderer, diagram_id};
pub use document::{DECORATION_STYLE, MAC_CODE_STYLE, assemble};
pub use export::export_html;
pub use footnotes::{Footnote, Footnotes};
pub use front_matter::{FrontMatter, split_front_matter};
pub use highlight::{HighlightError, Highlighter, PlainHighlighter, SyntectHighlighter};
pub use options::{DEFAULT_FOOTNOTE_HEADING, Legend, RenderOptions, SANS_SERIF_FONTS};
pub use renderer::{MarkdownRenderer, PLATFORM_LINK_PREFIX, RenderResult};
pub use state::escape_html;

/// Parser options: tables, strikethrough, task lists and GFM alerts.
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}
