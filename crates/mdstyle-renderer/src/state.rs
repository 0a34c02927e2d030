//! Per-render state tracked while walking markdown events.

use mdstyle_theme::{AlertVariant, ElementKind};
use pulldown_cmark::Alignment;

/// State for tracking code block rendering.
#[derive(Default)]
pub struct CodeBlockState {
    active: bool,
    /// Full fence info string (e.g. `rust ignore`).
    info: String,
    buffer: String,
}

impl CodeBlockState {
    pub fn start(&mut self, info: String) {
        self.active = true;
        self.info = info;
        self.buffer.clear();
    }

    /// End the current code block and return (info, content).
    pub fn end(&mut self) -> (String, String) {
        self.active = false;
        (
            std::mem::take(&mut self.info),
            std::mem::take(&mut self.buffer),
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.buffer.push_str(text);
    }
}

/// State for tracking image alt text capture.
#[derive(Default)]
pub struct ImageState {
    active: bool,
    alt_text: String,
}

impl ImageState {
    pub fn start(&mut self) {
        self.active = true;
        self.alt_text.clear();
    }

    /// End image capture and return the alt text.
    pub fn end(&mut self) -> String {
        self.active = false;
        std::mem::take(&mut self.alt_text)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn push_str(&mut self, text: &str) {
        self.alt_text.push_str(text);
    }
}

/// State for tracking table rendering.
#[derive(Default)]
pub struct TableState {
    alignments: Vec<Alignment>,
    cell_index: usize,
}

impl TableState {
    pub fn start(&mut self, alignments: Vec<Alignment>) {
        self.alignments = alignments;
        self.cell_index = 0;
    }

    pub fn start_row(&mut self) {
        self.cell_index = 0;
    }

    pub fn next_cell(&mut self) {
        self.cell_index += 1;
    }

    /// Extra declaration for the current cell's alignment.
    pub fn current_alignment(&self) -> &'static str {
        match self.alignments.get(self.cell_index) {
            Some(Alignment::Left) => "; text-align: left",
            Some(Alignment::Center) => "; text-align: center",
            Some(Alignment::Right) => "; text-align: right",
            Some(Alignment::None) | None => "",
        }
    }
}

/// Numbering context of one list level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListContext {
    pub ordered: bool,
    pub next_index: u64,
}

impl ListContext {
    pub fn new(start: Option<u64>) -> Self {
        Self {
            ordered: start.is_some(),
            next_index: start.unwrap_or(1),
        }
    }

    /// Prefix for the next item of this list, advancing the counter.
    pub fn next_prefix(&mut self) -> String {
        if self.ordered {
            let prefix = format!("{}. ", self.next_index);
            self.next_index += 1;
            prefix
        } else {
            "• ".to_owned()
        }
    }
}

/// Enclosing block that changes how paragraphs are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Container {
    BlockQuote(Option<AlertVariant>),
    Item,
}

impl Container {
    /// Style of a paragraph placed directly inside this container, or
    /// `None` when the paragraph is emitted without a wrapper.
    pub fn paragraph_kind(container: Option<Self>) -> Option<ElementKind> {
        match container {
            None => Some(ElementKind::P),
            Some(Self::BlockQuote(None)) => Some(ElementKind::BlockquoteP),
            Some(Self::BlockQuote(Some(variant))) => Some(variant.paragraph_kind()),
            Some(Self::Item) => None,
        }
    }
}

/// Link waiting for its closing tag.
pub struct PendingLink {
    pub href: String,
    pub title: String,
    /// Plain text of the link label.
    pub text: String,
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("<script>"), "&lt;script&gt;");
        assert_eq!(escape_html("a & b"), "a &amp; b");
        assert_eq!(escape_html(r#""quoted""#), "&quot;quoted&quot;");
        assert_eq!(escape_html("it's"), "it&#39;s");
    }

    #[test]
    fn test_code_block_state() {
        let mut state = CodeBlockState::default();
        assert!(!state.is_active());

        state.start("rust ignore".to_owned());
        assert!(state.is_active());

        state.push_str("fn main() {}");
        let (info, content) = state.end();
        assert_eq!(info, "rust ignore");
        assert_eq!(content, "fn main() {}");
        assert!(!state.is_active());
    }

    #[test]
    fn test_table_alignment() {
        let mut state = TableState::default();
        state.start(vec![Alignment::None, Alignment::Center]);
        assert_eq!(state.current_alignment(), "");
        state.next_cell();
        assert_eq!(state.current_alignment(), "; text-align: center");
        state.next_cell();
        assert_eq!(state.current_alignment(), "");
        state.start_row();
        assert_eq!(state.current_alignment(), "");
    }

    #[test]
    fn test_image_state() {
        let mut state = ImageState::default();
        state.start();
        assert!(state.is_active());
        state.push_str("Alt ");
        state.push_str("text");
        assert_eq!(state.end(), "Alt text");
        assert!(!state.is_active());
    }

    #[test]
    fn test_list_context_numbering() {
        let mut ordered = ListContext::new(Some(3));
        assert_eq!(ordered.next_prefix(), "3. ");
        assert_eq!(ordered.next_prefix(), "4. ");

        let mut bullets = ListContext::new(None);
        assert_eq!(bullets.next_prefix(), "• ");
        assert_eq!(bullets.next_index, 1);
    }

    #[test]
    fn test_paragraph_kind_by_container() {
        assert_eq!(Container::paragraph_kind(None), Some(ElementKind::P));
        assert_eq!(
            Container::paragraph_kind(Some(Container::BlockQuote(None))),
            Some(ElementKind::BlockquoteP)
        );
        assert_eq!(
            Container::paragraph_kind(Some(Container::BlockQuote(Some(AlertVariant::Tip)))),
            Some(ElementKind::BlockquotePTip)
        );
        assert_eq!(Container::paragraph_kind(Some(Container::Item)), None);
    }
}
