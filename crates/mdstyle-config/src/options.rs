//! Option label resolution.
//!
//! Options arrive as the labels shown in the editor UI (`衬线`, `经典蓝`,
//! `title 优先`) or as their plain values (`serif`, `#0F4C81`, `title-alt`).
//! Unrecognized values either fall back to the default with a warning or are
//! rejected, depending on [`FallbackPolicy`].

use std::fmt;
use std::str::FromStr;

use mdstyle_renderer::{Legend, RenderOptions, SANS_SERIF_FONTS};
use mdstyle_theme::ThemeId;
use serde::Deserialize;

use crate::DefaultsConfig;

pub const SERIF_FONTS: &str = "Optima-Regular, Optima, PingFangSC-light, PingFangTC-light, \
     'PingFang SC', Cambria, Cochin, Georgia, Times, 'Times New Roman', serif";

pub const MONOSPACE_FONTS: &str = "Menlo, Monaco, 'Courier New', monospace";

/// `(label, alias, font stack)`.
const FONT_FAMILIES: [(&str, &str, &str); 3] = [
    ("无衬线", "sans-serif", SANS_SERIF_FONTS),
    ("衬线", "serif", SERIF_FONTS),
    ("等宽", "monospace", MONOSPACE_FONTS),
];

pub const FONT_SIZES: [&str; 5] = ["12px", "13px", "14px", "15px", "16px"];

/// Named primary colors.
pub const COLORS: [(&str, &str); 11] = [
    ("经典蓝", "#0F4C81"),
    ("翡翠绿", "#009874"),
    ("活力橘", "#FA5151"),
    ("柠檬黄", "#FECE00"),
    ("薰衣紫", "#92617E"),
    ("天空蓝", "#55C9EA"),
    ("玫瑰金", "#B76E79"),
    ("橄榄绿", "#556B2F"),
    ("石墨黑", "#333333"),
    ("雾烟灰", "#A9A9A9"),
    ("樱花粉", "#FFB7C5"),
];

const LEGEND_LABELS: [(&str, Legend); 5] = [
    ("title 优先", Legend::TitleAlt),
    ("alt 优先", Legend::AltTitle),
    ("只显示 title", Legend::Title),
    ("只显示 alt", Legend::Alt),
    ("不显示", Legend::None),
];

/// highlight.js 11.10 theme stylesheets.
pub const CODE_THEMES: [&str; 73] = [
    "1c-light",
    "a11y-dark",
    "a11y-light",
    "agate",
    "an-old-hope",
    "androidstudio",
    "arduino-light",
    "arta",
    "ascetic",
    "atom-one-dark",
    "atom-one-dark-reasonable",
    "atom-one-light",
    "brown-paper",
    "codepen-embed",
    "color-brewer",
    "dark",
    "default",
    "devibeans",
    "docco",
    "far",
    "felipec",
    "foundation",
    "github",
    "github-dark",
    "github-dark-dimmed",
    "gml",
    "googlecode",
    "gradient-dark",
    "gradient-light",
    "grayscale",
    "hybrid",
    "idea",
    "intellij-light",
    "ir-black",
    "isbl-editor-dark",
    "isbl-editor-light",
    "kimbie-dark",
    "kimbie-light",
    "lightfair",
    "lioshi",
    "magula",
    "mono-blue",
    "monokai",
    "monokai-sublime",
    "night-owl",
    "nnfx-dark",
    "nnfx-light",
    "nord",
    "obsidian",
    "panda-syntax-dark",
    "panda-syntax-light",
    "paraiso-dark",
    "paraiso-light",
    "pojoaque",
    "purebasic",
    "qtcreator-dark",
    "qtcreator-light",
    "rainbow",
    "routeros",
    "school-book",
    "shades-of-purple",
    "srcery",
    "stackoverflow-dark",
    "stackoverflow-light",
    "sunburst",
    "tokyo-night-dark",
    "tokyo-night-light",
    "tomorrow-night-blue",
    "tomorrow-night-bright",
    "vs",
    "vs2015",
    "xcode",
    "xt256",
];

/// What to do with an option value that matches no known label or value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Log a warning and use the default.
    #[default]
    Warn,
    /// Fail with [`OptionError::Invalid`].
    Reject,
}

impl FromStr for FallbackPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "warn" => Ok(Self::Warn),
            "reject" => Ok(Self::Reject),
            other => Err(other.to_owned()),
        }
    }
}

/// Option resolution error.
#[derive(Debug, thiserror::Error)]
pub enum OptionError {
    #[error("Invalid value for {field}: {value:?}")]
    Invalid { field: &'static str, value: String },
}

pub fn font_family(value: &str) -> Option<&'static str> {
    FONT_FAMILIES
        .iter()
        .find(|(label, alias, _)| *label == value || *alias == value)
        .map(|(_, _, stack)| *stack)
}

pub fn font_size(value: &str) -> Option<&'static str> {
    FONT_SIZES.iter().copied().find(|size| *size == value)
}

/// Named color by label, or a literal `#rgb` / `#rrggbb` / `#rrggbbaa`.
pub fn color(value: &str) -> Option<String> {
    if let Some((_, hex)) = COLORS.iter().find(|(label, _)| *label == value) {
        return Some((*hex).to_owned());
    }
    let digits = value.strip_prefix('#')?;
    let valid = matches!(digits.len(), 3 | 6 | 8) && digits.chars().all(|c| c.is_ascii_hexdigit());
    valid.then(|| value.to_owned())
}

pub fn legend(value: &str) -> Option<Legend> {
    LEGEND_LABELS
        .iter()
        .find(|(label, _)| *label == value)
        .map(|(_, legend)| *legend)
        .or_else(|| value.parse().ok())
}

/// Code theme by id. A trailing `.min.css` is accepted.
pub fn code_theme(value: &str) -> Option<&'static str> {
    let id = value.strip_suffix(".min.css").unwrap_or(value);
    CODE_THEMES.iter().copied().find(|theme| *theme == id)
}

/// Resolve `[defaults]` into render options.
pub fn resolve(defaults: &DefaultsConfig) -> Result<RenderOptions, OptionError> {
    let policy = defaults.fallback;
    let base = RenderOptions::default();

    Ok(RenderOptions {
        theme: pick(
            policy,
            "theme",
            &defaults.theme,
            defaults.theme.parse::<ThemeId>().ok(),
            base.theme,
        )?,
        font_family: pick(
            policy,
            "font_family",
            &defaults.font_family,
            font_family(&defaults.font_family).map(str::to_owned),
            base.font_family,
        )?,
        font_size: pick(
            policy,
            "font_size",
            &defaults.font_size,
            font_size(&defaults.font_size).map(str::to_owned),
            base.font_size,
        )?,
        use_indent: defaults.use_indent,
        primary_color: pick(
            policy,
            "primary_color",
            &defaults.primary_color,
            color(&defaults.primary_color),
            base.primary_color,
        )?,
        citations_enabled: defaults.citations,
        legend: pick(
            policy,
            "legend",
            &defaults.legend,
            legend(&defaults.legend),
            base.legend,
        )?,
        mac_code_blocks: defaults.mac_code_blocks,
        code_theme_id: pick(
            policy,
            "code_theme",
            &defaults.code_theme,
            code_theme(&defaults.code_theme).map(str::to_owned),
            base.code_theme_id,
        )?,
        custom_css: None,
        footnote_heading: defaults
            .footnote_heading
            .clone()
            .unwrap_or(base.footnote_heading),
    })
}

fn pick<T: fmt::Display>(
    policy: FallbackPolicy,
    field: &'static str,
    value: &str,
    resolved: Option<T>,
    default: T,
) -> Result<T, OptionError> {
    match (resolved, policy) {
        (Some(resolved), _) => Ok(resolved),
        (None, FallbackPolicy::Warn) => {
            tracing::warn!(field, value, default = %default, "Unrecognized option value, using default");
            Ok(default)
        }
        (None, FallbackPolicy::Reject) => Err(OptionError::Invalid {
            field,
            value: value.to_owned(),
        }),
    }
}
