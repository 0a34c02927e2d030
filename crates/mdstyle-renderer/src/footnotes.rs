//! Citation footnotes collected from links.

use mdstyle_theme::{ElementKind, StyleMap};

use crate::state::escape_html;

/// One recorded citation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Footnote {
    /// 1-based, in recording order.
    pub index: usize,
    pub title: String,
    pub link: String,
}

/// Citations recorded during one render.
#[derive(Debug, Default)]
pub struct Footnotes {
    entries: Vec<Footnote>,
}

impl Footnotes {
    /// Record a citation and return its index.
    pub fn add(&mut self, title: &str, link: &str) -> usize {
        let index = self.entries.len() + 1;
        self.entries.push(Footnote {
            index,
            title: title.to_owned(),
            link: link.to_owned(),
        });
        index
    }

    pub fn entries(&self) -> &[Footnote] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Footnote section: a heading followed by one line per citation.
    ///
    /// Empty when nothing was recorded.
    pub fn render_section(&self, styles: &StyleMap, heading: &str) -> String {
        if self.entries.is_empty() {
            return String::new();
        }

        let items = self
            .entries
            .iter()
            .map(render_item)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "<h4{}>{}</h4><p{}>{items}</p>",
            styles.attr(ElementKind::H4),
            escape_html(heading),
            styles.attr(ElementKind::Footnotes),
        )
    }
}

fn render_item(footnote: &Footnote) -> String {
    let index = footnote.index;
    let title = escape_html(&footnote.title);
    if footnote.title == footnote.link {
        format!(
            r#"<code style="font-size: 90%; opacity: 0.6;">[{index}]</code>: <i style="word-break: break-all">{title}</i><br/>"#
        )
    } else {
        let link = escape_html(&footnote.link);
        format!(
            r#"<code style="font-size: 90%; opacity: 0.6;">[{index}]</code> {title}: <i style="word-break: break-all">{link}</i><br/>"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_indices_follow_recording_order() {
        let mut footnotes = Footnotes::default();
        assert_eq!(footnotes.add("A", "https://a.example"), 1);
        assert_eq!(footnotes.add("B", "https://b.example"), 2);
        let titles: Vec<_> = footnotes.entries().iter().map(|f| f.title.as_str()).collect();
        assert_eq!(titles, ["A", "B"]);
    }

    #[test]
    fn test_empty_section() {
        assert_eq!(Footnotes::default().render_section(&StyleMap::default(), "Links"), "");
    }

    #[test]
    fn test_section_markup() {
        let mut footnotes = Footnotes::default();
        footnotes.add("Docs", "https://docs.example");
        footnotes.add("https://x.example", "https://x.example");

        assert_eq!(
            footnotes.render_section(&StyleMap::default(), "Links"),
            "<h4>Links</h4><p>\
             <code style=\"font-size: 90%; opacity: 0.6;\">[1]</code> Docs: \
             <i style=\"word-break: break-all\">https://docs.example</i><br/>\n\
             <code style=\"font-size: 90%; opacity: 0.6;\">[2]</code>: \
             <i style=\"word-break: break-all\">https://x.example</i><br/></p>"
        );
    }
}
