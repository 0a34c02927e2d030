//! Styled markdown renderer.

use std::fmt::Write;

use mdstyle_theme::{AlertVariant, ElementKind, StyleMap};
use pulldown_cmark::{BlockQuoteKind, CodeBlockKind, Event, Tag, TagEnd};

use crate::code_block::{flatten_highlighted, is_diagram, language_token, mac_sign};
use crate::diagram::{DiagramRenderer, diagram_id};
use crate::footnotes::Footnotes;
use crate::highlight::{Highlighter, PlainHighlighter};
use crate::options::{DEFAULT_FOOTNOTE_HEADING, Legend};
use crate::state::{
    CodeBlockState, Container, ImageState, ListContext, PendingLink, TableState, escape_html,
};
use crate::util::heading_level_to_num;

/// Links to this host render as real anchors; everything else becomes a
/// styled span (optionally with a citation).
pub const PLATFORM_LINK_PREFIX: &str = "https://mp.weixin.qq.com";

const TABLE_WRAPPER_STYLE: &str = "padding:0 8px; max-width: 100%; overflow: auto";

/// Result of rendering markdown.
#[derive(Clone, Debug, Default)]
pub struct RenderResult {
    /// Rendered body HTML.
    pub html: String,
    /// Citation section, empty when no citations were recorded.
    pub footnotes: String,
    /// Non-fatal problems (failed diagrams, highlighter fallbacks).
    pub warnings: Vec<String>,
}

/// Markdown renderer that writes every element's theme styles inline.
///
/// A renderer is consumed by [`render`](Self::render), so all counters and
/// citations start fresh for each document.
pub struct MarkdownRenderer<'a> {
    styles: &'a StyleMap,
    highlighter: &'a dyn Highlighter,
    diagrams: Option<&'a dyn DiagramRenderer>,
    legend: Legend,
    citations: bool,
    footnote_heading: String,
    output: String,
    /// Outer outputs saved while an element's content is buffered.
    saved: Vec<String>,
    /// Enclosing blockquotes and list items, innermost last.
    containers: Vec<Container>,
    /// Numbering of enclosing lists, innermost last.
    lists: Vec<ListContext>,
    links: Vec<PendingLink>,
    code: CodeBlockState,
    table: TableState,
    image: ImageState,
    /// Pending image (src, title) waiting for alt text.
    pending_image: Option<(String, String)>,
    footnotes: Footnotes,
    diagram_index: usize,
    warnings: Vec<String>,
}

impl<'a> MarkdownRenderer<'a> {
    #[must_use]
    pub fn new(styles: &'a StyleMap) -> Self {
        Self {
            styles,
            highlighter: &PlainHighlighter,
            diagrams: None,
            legend: Legend::default(),
            citations: false,
            footnote_heading: DEFAULT_FOOTNOTE_HEADING.to_owned(),
            output: String::with_capacity(4096),
            saved: Vec::new(),
            containers: Vec::new(),
            lists: Vec::new(),
            links: Vec::new(),
            code: CodeBlockState::default(),
            table: TableState::default(),
            image: ImageState::default(),
            pending_image: None,
            footnotes: Footnotes::default(),
            diagram_index: 0,
            warnings: Vec::new(),
        }
    }

    /// Set the highlighter for fenced code. Defaults to escaping only.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: &'a dyn Highlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    /// Render `mermaid` fences through `diagrams`.
    ///
    /// Without a diagram renderer the escaped source is emitted for
    /// client-side rendering.
    #[must_use]
    pub fn with_diagrams(mut self, diagrams: &'a dyn DiagramRenderer) -> Self {
        self.diagrams = Some(diagrams);
        self
    }

    #[must_use]
    pub fn with_legend(mut self, legend: Legend) -> Self {
        self.legend = legend;
        self
    }

    /// Turn non-platform links into numbered citations.
    #[must_use]
    pub fn with_citations(mut self, enabled: bool) -> Self {
        self.citations = enabled;
        self
    }

    #[must_use]
    pub fn with_footnote_heading(mut self, heading: impl Into<String>) -> Self {
        self.footnote_heading = heading.into();
        self
    }

    /// Render markdown events.
    pub fn render<'e, I>(mut self, events: I) -> RenderResult
    where
        I: Iterator<Item = Event<'e>>,
    {
        for event in events {
            self.process_event(event);
        }

        RenderResult {
            footnotes: self
                .footnotes
                .render_section(self.styles, &self.footnote_heading),
            html: self.output,
            warnings: self.warnings,
        }
    }

    fn attr(&self, kind: ElementKind) -> String {
        self.styles.attr(kind)
    }

    /// Start capturing output for an element whose wrapper depends on its
    /// content.
    fn begin_buffer(&mut self) {
        self.saved.push(std::mem::take(&mut self.output));
    }

    /// Stop capturing and return the captured HTML.
    fn end_buffer(&mut self) -> String {
        let outer = self.saved.pop().unwrap_or_default();
        std::mem::replace(&mut self.output, outer)
    }

    fn process_event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.inline_code(&code),
            Event::Html(html) | Event::InlineHtml(html) => self.output.push_str(&html),
            Event::SoftBreak | Event::HardBreak => self.line_break(),
            Event::Rule => {
                let attr = self.attr(ElementKind::Hr);
                write!(self.output, "<hr{attr}/>").unwrap();
            }
            Event::TaskListMarker(checked) => {
                self.output.push_str(if checked {
                    r#"<input type="checkbox" checked disabled> "#
                } else {
                    r#"<input type="checkbox" disabled> "#
                });
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not enabled in the parser
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph | Tag::Heading { .. } => self.begin_buffer(),
            Tag::BlockQuote(kind) => {
                let variant = kind.map(alert_variant);
                self.containers.push(Container::BlockQuote(variant));
                let quote_kind = variant.map_or(ElementKind::Blockquote, AlertVariant::blockquote_kind);
                let attr = self.attr(quote_kind);
                write!(self.output, "<blockquote{attr}>").unwrap();
                if let Some(variant) = variant {
                    let title_attr = self.attr(variant.title_kind());
                    write!(
                        self.output,
                        "<p{title_attr}>{} {}</p>",
                        variant.icon(),
                        variant.title()
                    )
                    .unwrap();
                }
            }
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.trim().to_owned(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code.start(info);
            }
            Tag::List(start) => {
                self.lists.push(ListContext::new(start));
                let (tag, kind) = if start.is_some() {
                    ("ol", ElementKind::Ol)
                } else {
                    ("ul", ElementKind::Ul)
                };
                let attr = self.attr(kind);
                write!(self.output, "<{tag}{attr}>").unwrap();
            }
            Tag::Item => {
                self.containers.push(Container::Item);
                let prefix = self
                    .lists
                    .last_mut()
                    .map(ListContext::next_prefix)
                    .unwrap_or_default();
                let attr = self.attr(ElementKind::ListItem);
                write!(self.output, "<li{attr}>{prefix}").unwrap();
            }
            Tag::Table(alignments) => {
                self.table.start(alignments);
                let attr = self.attr(ElementKind::Table);
                write!(
                    self.output,
                    r#"<section style="{TABLE_WRAPPER_STYLE}"><table class="preview-table"{attr}>"#
                )
                .unwrap();
            }
            Tag::TableHead => {
                self.table.start_row();
                let attr = self.attr(ElementKind::Thead);
                write!(self.output, "<thead{attr}><tr>").unwrap();
            }
            Tag::TableRow => {
                self.table.start_row();
                self.output.push_str("<tr>");
            }
            Tag::TableCell => {
                let attr = self
                    .styles
                    .attr_with(ElementKind::Td, self.table.current_alignment());
                write!(self.output, "<td{attr}>").unwrap();
            }
            Tag::Emphasis => {
                let attr = self.attr(ElementKind::Em);
                write!(self.output, "<span{attr}>").unwrap();
            }
            Tag::Strong => {
                let attr = self.attr(ElementKind::Strong);
                write!(self.output, "<strong{attr}>").unwrap();
            }
            Tag::Strikethrough => self.output.push_str("<del>"),
            Tag::Superscript => self.output.push_str("<sup>"),
            Tag::Subscript => self.output.push_str("<sub>"),
            // Links inside alt text only contribute their label
            Tag::Link { .. } if self.image.is_active() => {}
            Tag::Link {
                dest_url, title, ..
            } => {
                self.links.push(PendingLink {
                    href: dest_url.to_string(),
                    title: title.to_string(),
                    text: String::new(),
                });
                self.begin_buffer();
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                // Alt text arrives as text events; the figure is written on close
                self.image.start();
                self.pending_image = Some((dest_url.to_string(), title.to_string()));
            }
            Tag::FootnoteDefinition(_)
            | Tag::HtmlBlock
            | Tag::MetadataBlock(_)
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition => {}
        }
    }

    #[allow(clippy::too_many_lines)]
    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => {
                let content = self.end_buffer();
                self.paragraph(&content);
            }
            TagEnd::Heading(level) => {
                let content = self.end_buffer();
                let level = heading_level_to_num(level);
                let attr = ElementKind::heading(level)
                    .map(|kind| self.attr(kind))
                    .unwrap_or_default();
                write!(self.output, "<h{level}{attr}>{content}</h{level}>").unwrap();
            }
            TagEnd::BlockQuote(_) => {
                self.containers.pop();
                self.output.push_str("</blockquote>");
            }
            TagEnd::CodeBlock => {
                let (info, mut content) = self.code.end();
                if content.ends_with('\n') {
                    content.pop();
                }
                if is_diagram(&info) {
                    self.diagram(&content);
                } else {
                    self.code_block(&info, &content);
                }
            }
            TagEnd::List(ordered) => {
                self.lists.pop();
                self.output
                    .push_str(if ordered { "</ol>" } else { "</ul>" });
            }
            TagEnd::Item => {
                self.containers.pop();
                self.output.push_str("</li>");
            }
            TagEnd::Table => self.output.push_str("</tbody></table></section>"),
            TagEnd::TableHead => self.output.push_str("</tr></thead><tbody>"),
            TagEnd::TableRow => self.output.push_str("</tr>"),
            TagEnd::TableCell => {
                self.output.push_str("</td>");
                self.table.next_cell();
            }
            TagEnd::Emphasis => self.output.push_str("</span>"),
            TagEnd::Strong => self.output.push_str("</strong>"),
            TagEnd::Strikethrough => self.output.push_str("</del>"),
            TagEnd::Superscript => self.output.push_str("</sup>"),
            TagEnd::Subscript => self.output.push_str("</sub>"),
            TagEnd::Link if self.image.is_active() => {}
            TagEnd::Link => {
                let inner = self.end_buffer();
                if let Some(link) = self.links.pop() {
                    self.link(&link, &inner);
                }
            }
            TagEnd::Image => {
                let alt = self.image.end();
                if let Some(link) = self.links.last_mut() {
                    link.text.push_str(&alt);
                }
                if let Some((src, title)) = self.pending_image.take() {
                    self.image(&src, &alt, &title);
                }
            }
            TagEnd::FootnoteDefinition
            | TagEnd::HtmlBlock
            | TagEnd::MetadataBlock(_)
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition => {}
        }
    }

    fn paragraph(&mut self, content: &str) {
        let is_figure = content.contains("<figure") && content.contains("<img");
        if is_figure || content.trim().is_empty() {
            self.output.push_str(content);
            return;
        }
        match Container::paragraph_kind(self.containers.last().copied()) {
            Some(kind) => {
                let attr = self.attr(kind);
                write!(self.output, "<p{attr}>{content}</p>").unwrap();
            }
            None => self.output.push_str(content),
        }
    }

    fn link(&mut self, link: &PendingLink, inner: &str) {
        if link.href.starts_with(PLATFORM_LINK_PREFIX) {
            let title = if link.title.is_empty() {
                &link.text
            } else {
                &link.title
            };
            let attr = self.attr(ElementKind::WxLink);
            write!(
                self.output,
                r#"<a href="{}" title="{}"{attr}>{inner}</a>"#,
                escape_html(&link.href),
                escape_html(title)
            )
            .unwrap();
            return;
        }

        if link.href == link.text {
            self.output.push_str(inner);
            return;
        }

        let attr = self.attr(ElementKind::Link);
        if self.citations {
            let title = [&link.title, &link.text]
                .into_iter()
                .find(|candidate| !candidate.is_empty())
                .unwrap_or(&link.href);
            let index = self.footnotes.add(title, &link.href);
            let sup_attr = self.attr(ElementKind::Footnote);
            write!(
                self.output,
                "<span{attr}>{inner}<sup{sup_attr}>[{index}]</sup></span>"
            )
            .unwrap();
        } else {
            write!(self.output, "<span{attr}>{inner}</span>").unwrap();
        }
    }

    fn image(&mut self, src: &str, alt: &str, title: &str) {
        let caption = self.legend.caption(alt, title);
        let figure_attr = self.attr(ElementKind::Figure);
        let image_attr = self.attr(ElementKind::Image);
        write!(
            self.output,
            r#"<figure{figure_attr}><img{image_attr} src="{}" title="{}" alt="{}"/>"#,
            escape_html(src),
            escape_html(title),
            escape_html(alt)
        )
        .unwrap();
        if !caption.is_empty() {
            let caption_attr = self.attr(ElementKind::Figcaption);
            write!(
                self.output,
                "<figcaption{caption_attr}>{}</figcaption>",
                escape_html(caption)
            )
            .unwrap();
        }
        self.output.push_str("</figure>");
    }

    fn diagram(&mut self, source: &str) {
        let id = diagram_id(self.diagram_index);
        self.diagram_index += 1;

        let svg = match self.diagrams {
            Some(diagrams) => match diagrams.render(source, &id) {
                Ok(svg) => Some(svg),
                Err(e) => {
                    tracing::warn!(error = %e, "Diagram rendering failed, keeping source");
                    self.warnings.push(e.to_string());
                    None
                }
            },
            None => None,
        };

        let content = svg.unwrap_or_else(|| escape_html(source));
        write!(self.output, r#"<pre class="mermaid">{content}</pre>"#).unwrap();
    }

    fn code_block(&mut self, info: &str, source: &str) {
        let language = language_token(info);
        let highlighted = match self.highlighter.highlight(source, language) {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(error = %e, "Highlighting failed, rendering plain text");
                self.warnings.push(e.to_string());
                escape_html(source)
            }
        };

        let pre_attr = self.attr(ElementKind::CodePre);
        let code_attr = self.attr(ElementKind::Code);
        write!(
            self.output,
            r#"<pre class="hljs code__pre"{pre_attr}>{}<code class="language-{}"{code_attr}>{}</code></pre>"#,
            mac_sign(),
            escape_html(info),
            flatten_highlighted(&highlighted)
        )
        .unwrap();
    }

    fn text(&mut self, text: &str) {
        // Priority: code > image > normal text
        if self.code.is_active() {
            self.code.push_str(text);
            return;
        }

        if self.image.is_active() {
            self.image.push_str(text);
            return;
        }

        if let Some(link) = self.links.last_mut() {
            link.text.push_str(text);
        }
        self.output.push_str(&escape_html(text));
    }

    fn inline_code(&mut self, code: &str) {
        if self.image.is_active() {
            self.image.push_str(code);
            return;
        }
        if let Some(link) = self.links.last_mut() {
            link.text.push_str(code);
        }
        let attr = self.attr(ElementKind::Codespan);
        write!(self.output, "<code{attr}>{}</code>", escape_html(code)).unwrap();
    }

    fn line_break(&mut self) {
        if self.image.is_active() {
            self.image.push_str(" ");
        } else {
            self.output.push_str("<br/>");
        }
    }
}

fn alert_variant(kind: BlockQuoteKind) -> AlertVariant {
    match kind {
        BlockQuoteKind::Note => AlertVariant::Note,
        BlockQuoteKind::Tip => AlertVariant::Tip,
        BlockQuoteKind::Important => AlertVariant::Important,
        BlockQuoteKind::Warning => AlertVariant::Warning,
        BlockQuoteKind::Caution => AlertVariant::Caution,
    }
}
