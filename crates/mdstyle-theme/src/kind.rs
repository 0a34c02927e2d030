//! Styleable element kinds.
//!
//! Every element the renderer emits is styled through exactly one
//! [`ElementKind`]. Kinds carry a stable snake-case name that theme files
//! and user CSS selectors refer to.

use std::fmt;
use std::str::FromStr;

/// Whether a kind lives in a theme's `block` or `inline` table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    Block,
    Inline,
}

/// GitHub-flavored alert variant (`> [!NOTE]` and friends).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AlertVariant {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertVariant {
    /// Lowercase variant name, as used in kind names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Tip => "tip",
            Self::Important => "important",
            Self::Warning => "warning",
            Self::Caution => "caution",
        }
    }

    /// Title shown in the alert header.
    pub fn title(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Tip => "Tip",
            Self::Important => "Important",
            Self::Warning => "Warning",
            Self::Caution => "Caution",
        }
    }

    /// Icon shown before the alert title.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Note => "ℹ️",
            Self::Tip => "💡",
            Self::Important => "❗",
            Self::Warning => "⚠️",
            Self::Caution => "🔴",
        }
    }

    /// Kind of the alert's blockquote container.
    pub fn blockquote_kind(self) -> ElementKind {
        match self {
            Self::Note => ElementKind::BlockquoteNote,
            Self::Tip => ElementKind::BlockquoteTip,
            Self::Important => ElementKind::BlockquoteImportant,
            Self::Warning => ElementKind::BlockquoteWarning,
            Self::Caution => ElementKind::BlockquoteCaution,
        }
    }

    /// Kind of the alert's title paragraph.
    pub fn title_kind(self) -> ElementKind {
        match self {
            Self::Note => ElementKind::BlockquoteTitleNote,
            Self::Tip => ElementKind::BlockquoteTitleTip,
            Self::Important => ElementKind::BlockquoteTitleImportant,
            Self::Warning => ElementKind::BlockquoteTitleWarning,
            Self::Caution => ElementKind::BlockquoteTitleCaution,
        }
    }

    /// Kind of the paragraphs inside the alert body.
    pub fn paragraph_kind(self) -> ElementKind {
        match self {
            Self::Note => ElementKind::BlockquotePNote,
            Self::Tip => ElementKind::BlockquotePTip,
            Self::Important => ElementKind::BlockquotePImportant,
            Self::Warning => ElementKind::BlockquotePWarning,
            Self::Caution => ElementKind::BlockquotePCaution,
        }
    }
}

/// A styleable element kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    // Block kinds
    Container,
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
    P,
    Blockquote,
    BlockquoteP,
    BlockquoteNote,
    BlockquoteTip,
    BlockquoteImportant,
    BlockquoteWarning,
    BlockquoteCaution,
    BlockquoteTitle,
    BlockquoteTitleNote,
    BlockquoteTitleTip,
    BlockquoteTitleImportant,
    BlockquoteTitleWarning,
    BlockquoteTitleCaution,
    BlockquotePNote,
    BlockquotePTip,
    BlockquotePImportant,
    BlockquotePWarning,
    BlockquotePCaution,
    CodePre,
    Code,
    Image,
    Ol,
    Ul,
    Footnotes,
    Figure,
    Hr,
    // Inline kinds
    ListItem,
    Codespan,
    Link,
    WxLink,
    Strong,
    Table,
    Thead,
    Td,
    Footnote,
    Figcaption,
    Em,
}

impl ElementKind {
    /// Every kind, block kinds first.
    pub const ALL: [ElementKind; 45] = [
        Self::Container,
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H5,
        Self::H6,
        Self::P,
        Self::Blockquote,
        Self::BlockquoteP,
        Self::BlockquoteNote,
        Self::BlockquoteTip,
        Self::BlockquoteImportant,
        Self::BlockquoteWarning,
        Self::BlockquoteCaution,
        Self::BlockquoteTitle,
        Self::BlockquoteTitleNote,
        Self::BlockquoteTitleTip,
        Self::BlockquoteTitleImportant,
        Self::BlockquoteTitleWarning,
        Self::BlockquoteTitleCaution,
        Self::BlockquotePNote,
        Self::BlockquotePTip,
        Self::BlockquotePImportant,
        Self::BlockquotePWarning,
        Self::BlockquotePCaution,
        Self::CodePre,
        Self::Code,
        Self::Image,
        Self::Ol,
        Self::Ul,
        Self::Footnotes,
        Self::Figure,
        Self::Hr,
        Self::ListItem,
        Self::Codespan,
        Self::Link,
        Self::WxLink,
        Self::Strong,
        Self::Table,
        Self::Thead,
        Self::Td,
        Self::Footnote,
        Self::Figcaption,
        Self::Em,
    ];

    /// Stable snake-case name used by theme files and CSS selectors.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
            Self::P => "p",
            Self::Blockquote => "blockquote",
            Self::BlockquoteP => "blockquote_p",
            Self::BlockquoteNote => "blockquote_note",
            Self::BlockquoteTip => "blockquote_tip",
            Self::BlockquoteImportant => "blockquote_important",
            Self::BlockquoteWarning => "blockquote_warning",
            Self::BlockquoteCaution => "blockquote_caution",
            Self::BlockquoteTitle => "blockquote_title",
            Self::BlockquoteTitleNote => "blockquote_title_note",
            Self::BlockquoteTitleTip => "blockquote_title_tip",
            Self::BlockquoteTitleImportant => "blockquote_title_important",
            Self::BlockquoteTitleWarning => "blockquote_title_warning",
            Self::BlockquoteTitleCaution => "blockquote_title_caution",
            Self::BlockquotePNote => "blockquote_p_note",
            Self::BlockquotePTip => "blockquote_p_tip",
            Self::BlockquotePImportant => "blockquote_p_important",
            Self::BlockquotePWarning => "blockquote_p_warning",
            Self::BlockquotePCaution => "blockquote_p_caution",
            Self::CodePre => "code_pre",
            Self::Code => "code",
            Self::Image => "image",
            Self::Ol => "ol",
            Self::Ul => "ul",
            Self::Footnotes => "footnotes",
            Self::Figure => "figure",
            Self::Hr => "hr",
            Self::ListItem => "listitem",
            Self::Codespan => "codespan",
            Self::Link => "link",
            Self::WxLink => "wx_link",
            Self::Strong => "strong",
            Self::Table => "table",
            Self::Thead => "thead",
            Self::Td => "td",
            Self::Footnote => "footnote",
            Self::Figcaption => "figcaption",
            Self::Em => "em",
        }
    }

    pub fn category(self) -> Category {
        if self >= Self::ListItem {
            Category::Inline
        } else {
            Category::Block
        }
    }

    /// Heading kind for a level in `1..=6`.
    pub fn heading(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::H1),
            2 => Some(Self::H2),
            3 => Some(Self::H3),
            4 => Some(Self::H4),
            5 => Some(Self::H5),
            6 => Some(Self::H6),
            _ => None,
        }
    }

    /// Generic kind an alert-specific kind inherits from.
    ///
    /// `blockquote_note` inherits `blockquote`, `blockquote_title_note`
    /// inherits `blockquote_title`, `blockquote_p_note` inherits
    /// `blockquote_p`. Other kinds have no family root.
    pub fn family_root(self) -> Option<Self> {
        match self {
            Self::BlockquoteNote
            | Self::BlockquoteTip
            | Self::BlockquoteImportant
            | Self::BlockquoteWarning
            | Self::BlockquoteCaution => Some(Self::Blockquote),
            Self::BlockquoteTitleNote
            | Self::BlockquoteTitleTip
            | Self::BlockquoteTitleImportant
            | Self::BlockquoteTitleWarning
            | Self::BlockquoteTitleCaution => Some(Self::BlockquoteTitle),
            Self::BlockquotePNote
            | Self::BlockquotePTip
            | Self::BlockquotePImportant
            | Self::BlockquotePWarning
            | Self::BlockquotePCaution => Some(Self::BlockquoteP),
            _ => None,
        }
    }

    /// Whether user CSS may restyle this kind.
    pub fn accepts_user_css(self) -> bool {
        matches!(
            self,
            Self::Container
                | Self::H1
                | Self::H2
                | Self::H3
                | Self::H4
                | Self::H5
                | Self::H6
                | Self::Code
                | Self::CodePre
                | Self::P
                | Self::Hr
                | Self::Image
                | Self::Ul
                | Self::Ol
                | Self::Strong
                | Self::Codespan
                | Self::Link
                | Self::WxLink
                | Self::ListItem
        ) || self.is_blockquote()
    }

    fn is_blockquote(self) -> bool {
        (Self::Blockquote..=Self::BlockquotePCaution).contains(&self)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a name does not match any [`ElementKind`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown element kind: {0}")]
pub struct UnknownKind(pub String);

impl FromStr for ElementKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| UnknownKind(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in ElementKind::ALL {
            assert_eq!(kind.as_str().parse::<ElementKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            "h7".parse::<ElementKind>(),
            Err(UnknownKind("h7".to_owned()))
        );
    }

    #[test]
    fn test_category_split() {
        assert_eq!(ElementKind::Hr.category(), Category::Block);
        assert_eq!(ElementKind::ListItem.category(), Category::Inline);
        assert_eq!(ElementKind::Em.category(), Category::Inline);
        assert_eq!(ElementKind::Container.category(), Category::Block);
    }

    #[test]
    fn test_family_root() {
        assert_eq!(
            ElementKind::BlockquoteWarning.family_root(),
            Some(ElementKind::Blockquote)
        );
        assert_eq!(
            AlertVariant::Tip.title_kind().family_root(),
            Some(ElementKind::BlockquoteTitle)
        );
        assert_eq!(
            AlertVariant::Caution.paragraph_kind().family_root(),
            Some(ElementKind::BlockquoteP)
        );
        assert_eq!(ElementKind::Blockquote.family_root(), None);
    }

    #[test]
    fn test_user_css_allow_list() {
        assert!(ElementKind::H3.accepts_user_css());
        assert!(ElementKind::BlockquoteTitleNote.accepts_user_css());
        assert!(ElementKind::WxLink.accepts_user_css());
        assert!(!ElementKind::Table.accepts_user_css());
        assert!(!ElementKind::Footnotes.accepts_user_css());
        assert!(!ElementKind::Figcaption.accepts_user_css());
    }

    #[test]
    fn test_heading_kinds() {
        assert_eq!(ElementKind::heading(2), Some(ElementKind::H2));
        assert_eq!(ElementKind::heading(0), None);
        assert_eq!(ElementKind::heading(7), None);
    }
}
