//! Render options.

use std::fmt;
use std::str::FromStr;

use mdstyle_theme::{ThemeId, ThemeParams};

/// Default sans-serif font stack.
pub const SANS_SERIF_FONTS: &str = "-apple-system-font,BlinkMacSystemFont, Helvetica Neue, \
     PingFang SC, Hiragino Sans GB , Microsoft YaHei UI , Microsoft YaHei ,Arial,sans-serif";

/// Default footnote section heading.
pub const DEFAULT_FOOTNOTE_HEADING: &str = "引用链接";

/// Which image attribute becomes the figure caption.
///
/// Compound variants try the first attribute and fall back to the second
/// when it is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Legend {
    TitleAlt,
    AltTitle,
    #[default]
    Title,
    Alt,
    None,
}

impl Legend {
    pub const ALL: [Legend; 5] = [
        Self::TitleAlt,
        Self::AltTitle,
        Self::Title,
        Self::Alt,
        Self::None,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TitleAlt => "title-alt",
            Self::AltTitle => "alt-title",
            Self::Title => "title",
            Self::Alt => "alt",
            Self::None => "none",
        }
    }

    /// Caption for an image with `alt` text and `title`.
    pub fn caption<'a>(self, alt: &'a str, title: &'a str) -> &'a str {
        let first_non_empty = |first: &'a str, second: &'a str| {
            if first.is_empty() { second } else { first }
        };
        match self {
            Self::TitleAlt => first_non_empty(title, alt),
            Self::AltTitle => first_non_empty(alt, title),
            Self::Title => title,
            Self::Alt => alt,
            Self::None => "",
        }
    }
}

impl fmt::Display for Legend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Legend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|legend| legend.as_str() == s)
            .ok_or_else(|| s.to_owned())
    }
}

/// Options for a single render.
///
/// All values are already resolved; label lookup and fallback happen before
/// a value of this type is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    pub theme: ThemeId,
    pub font_family: String,
    pub font_size: String,
    /// Indent the first line of every paragraph.
    pub use_indent: bool,
    pub primary_color: String,
    /// Turn external links into numbered citations listed after the body.
    pub citations_enabled: bool,
    pub legend: Legend,
    /// Show the macOS-style window dots on code blocks.
    pub mac_code_blocks: bool,
    /// highlight.js theme whose stylesheet is inlined on export.
    pub code_theme_id: String,
    /// User CSS layered over the theme.
    pub custom_css: Option<String>,
    pub footnote_heading: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: ThemeId::Default,
            font_family: SANS_SERIF_FONTS.to_owned(),
            font_size: "14px".to_owned(),
            use_indent: false,
            primary_color: "#0F4C81".to_owned(),
            citations_enabled: false,
            legend: Legend::Title,
            mac_code_blocks: true,
            code_theme_id: "tokyo-night-light".to_owned(),
            custom_css: None,
            footnote_heading: DEFAULT_FOOTNOTE_HEADING.to_owned(),
        }
    }
}

impl RenderOptions {
    /// Parameters for theme compilation.
    pub fn theme_params(&self) -> ThemeParams {
        ThemeParams {
            font_family: self.font_family.clone(),
            font_size: self.font_size.clone(),
            use_indent: self.use_indent,
            primary_color: self.primary_color.clone(),
        }
    }
}
