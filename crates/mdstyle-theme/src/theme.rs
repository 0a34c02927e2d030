//! Themes and the built-in theme repository.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::css::CssRules;
use crate::kind::{Category, ElementKind};

/// Ordered CSS property map (`property -> value`).
pub type PropertyMap = BTreeMap<String, String>;

/// Error loading a theme definition.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("Invalid theme file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Unknown element kind `{name}` in [{table}]")]
    UnknownKind { table: &'static str, name: String },
    #[error("Element kind `{name}` belongs in [{expected}], found in [{found}]")]
    WrongTable {
        name: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// Identifier of a built-in theme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeId {
    #[default]
    Default,
    Grace,
}

impl ThemeId {
    pub const ALL: [ThemeId; 2] = [Self::Default, Self::Grace];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Grace => "grace",
        }
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Default => "经典",
            Self::Grace => "优雅",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s || id.label() == s)
            .ok_or_else(|| s.to_owned())
    }
}

/// Layered style definition: shared base properties plus per-kind overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Theme {
    pub base: PropertyMap,
    pub block: BTreeMap<ElementKind, PropertyMap>,
    pub inline: BTreeMap<ElementKind, PropertyMap>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct ThemeFile {
    base: PropertyMap,
    block: BTreeMap<String, PropertyMap>,
    inline: BTreeMap<String, PropertyMap>,
}

static DEFAULT_THEME: LazyLock<Theme> = LazyLock::new(|| {
    Theme::from_toml(include_str!("../themes/default.toml")).expect("built-in default theme")
});

static GRACE_THEME: LazyLock<Theme> = LazyLock::new(|| {
    let overlay =
        Theme::from_toml(include_str!("../themes/grace.toml")).expect("built-in grace theme");
    DEFAULT_THEME.overlay(&overlay)
});

impl Theme {
    /// Borrow a built-in theme.
    ///
    /// Built-ins are shared statics; compile clones before mutating.
    pub fn builtin(id: ThemeId) -> &'static Theme {
        match id {
            ThemeId::Default => &DEFAULT_THEME,
            ThemeId::Grace => &GRACE_THEME,
        }
    }

    /// Parse a theme from TOML with `[base]`, `[block.<kind>]` and
    /// `[inline.<kind>]` tables.
    pub fn from_toml(source: &str) -> Result<Self, ThemeError> {
        let file: ThemeFile = toml::from_str(source)?;
        Ok(Self {
            base: file.base,
            block: kinds_from_table(file.block, Category::Block)?,
            inline: kinds_from_table(file.inline, Category::Inline)?,
        })
    }

    /// Per-kind overrides for `kind`, looked up in the table its category
    /// selects.
    pub fn kind(&self, kind: ElementKind) -> Option<&PropertyMap> {
        match kind.category() {
            Category::Block => self.block.get(&kind),
            Category::Inline => self.inline.get(&kind),
        }
    }

    fn kind_mut(&mut self, kind: ElementKind) -> &mut PropertyMap {
        let table = match kind.category() {
            Category::Block => &mut self.block,
            Category::Inline => &mut self.inline,
        };
        table.entry(kind).or_default()
    }

    /// New theme with `other` layered on top; properties in `other` win.
    #[must_use]
    pub fn overlay(&self, other: &Theme) -> Theme {
        let mut merged = self.clone();
        merge_into(&mut merged.base, &other.base);
        for (kind, props) in other.block.iter().chain(&other.inline) {
            merge_into(merged.kind_mut(*kind), props);
        }
        merged
    }

    /// New theme with user CSS rules merged in.
    ///
    /// Only selectors naming an allow-listed kind are applied; anything
    /// else in `rules` is ignored. User declarations win over the theme's.
    #[must_use]
    pub fn with_overrides(&self, rules: &CssRules) -> Theme {
        let mut merged = self.clone();
        for (selector, props) in rules {
            let Ok(kind) = selector.parse::<ElementKind>() else {
                continue;
            };
            if kind.accepts_user_css() {
                merge_into(merged.kind_mut(kind), props);
            }
        }
        merged
    }
}

/// Merge `from` into `into`, overwriting existing keys.
pub(crate) fn merge_into(into: &mut PropertyMap, from: &PropertyMap) {
    for (key, value) in from {
        into.insert(key.clone(), value.clone());
    }
}

fn kinds_from_table(
    table: BTreeMap<String, PropertyMap>,
    category: Category,
) -> Result<BTreeMap<ElementKind, PropertyMap>, ThemeError> {
    let table_name = category_name(category);
    table
        .into_iter()
        .map(|(name, props)| {
            let kind = name
                .parse::<ElementKind>()
                .map_err(|_| ThemeError::UnknownKind {
                    table: table_name,
                    name: name.clone(),
                })?;
            if kind.category() != category {
                return Err(ThemeError::WrongTable {
                    name,
                    expected: category_name(kind.category()),
                    found: table_name,
                });
            }
            Ok((kind, props))
        })
        .collect()
}

fn category_name(category: Category) -> &'static str {
    match category {
        Category::Block => "block",
        Category::Inline => "inline",
    }
}
