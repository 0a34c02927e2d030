//! Theme compilation into a flat per-kind style table.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::kind::ElementKind;
use crate::theme::{PropertyMap, Theme, merge_into};

/// Custom property carrying the primary color until export.
pub const PRIMARY_COLOR_VAR: &str = "--md-primary-color";

/// Reference to [`PRIMARY_COLOR_VAR`] as it appears in property values.
pub const PRIMARY_COLOR_REF: &str = "var(--md-primary-color)";

/// Per-render values layered over a theme's base properties.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeParams {
    pub font_family: String,
    pub font_size: String,
    pub use_indent: bool,
    pub primary_color: String,
}

/// Fully resolved style declarations per element kind.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: BTreeMap<ElementKind, PropertyMap>,
}

impl StyleMap {
    pub fn get(&self, kind: ElementKind) -> Option<&PropertyMap> {
        self.entries.get(&kind)
    }

    /// Serialized declarations for `kind` (`prop: value; prop: value`).
    pub fn declarations(&self, kind: ElementKind) -> Option<String> {
        self.get(kind).map(|props| {
            props
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect::<Vec<_>>()
                .join("; ")
        })
    }

    /// ` style="…"` attribute for `kind`, or an empty string when the kind
    /// has no entry.
    pub fn attr(&self, kind: ElementKind) -> String {
        self.attr_with(kind, "")
    }

    /// Like [`attr`](Self::attr), with `addition` appended verbatim to the
    /// declarations.
    pub fn attr_with(&self, kind: ElementKind, addition: &str) -> String {
        match self.declarations(kind) {
            Some(declarations) => {
                format!(r#" style="{}{}""#, escape_attr(&declarations), escape_attr(addition))
            }
            None => String::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Compile `theme` with `params` into a [`StyleMap`].
///
/// The theme is never mutated. The base gains `font-family`, `font-size` and
/// the primary color custom property; each kind's entry is the base overlaid
/// with its family root (for alert kinds) and then its own declarations.
/// With `use_indent`, paragraphs get `text-indent: 2em` unless the theme
/// already sets one.
pub fn compile(theme: &Theme, params: &ThemeParams) -> StyleMap {
    let mut base = theme.base.clone();
    base.insert("font-family".to_owned(), params.font_family.clone());
    base.insert("font-size".to_owned(), params.font_size.clone());
    base.insert(PRIMARY_COLOR_VAR.to_owned(), params.primary_color.clone());

    let mut entries = BTreeMap::new();
    for kind in ElementKind::ALL {
        let own = own_declarations(theme, kind, params.use_indent);
        let root = kind.family_root().and_then(|root| theme.kind(root));
        if own.is_none() && root.is_none() {
            continue;
        }

        let mut props = base.clone();
        if let Some(root) = root {
            merge_into(&mut props, root);
        }
        if let Some(own) = own {
            merge_into(&mut props, &own);
        }
        entries.insert(kind, props);
    }

    StyleMap { entries }
}

fn own_declarations(theme: &Theme, kind: ElementKind, use_indent: bool) -> Option<Cow<'_, PropertyMap>> {
    let own = theme.kind(kind);
    if kind != ElementKind::P || !use_indent {
        return own.map(Cow::Borrowed);
    }
    let mut indented = PropertyMap::from([("text-indent".to_owned(), "2em".to_owned())]);
    if let Some(own) = own {
        merge_into(&mut indented, own);
    }
    Some(Cow::Owned(indented))
}

fn escape_attr(value: &str) -> Cow<'_, str> {
    if value.contains('"') {
        Cow::Owned(value.replace('"', "&quot;"))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::css_to_rules;
    use crate::theme::ThemeId;
    use pretty_assertions::assert_eq;

    fn params() -> ThemeParams {
        ThemeParams {
            font_family: "serif".to_owned(),
            font_size: "14px".to_owned(),
            use_indent: false,
            primary_color: "#009874".to_owned(),
        }
    }

    #[test]
    fn test_compile_is_deterministic_and_pure() {
        let theme = Theme::builtin(ThemeId::Default);
        let before = theme.clone();

        let first = compile(theme, &params());
        let second = compile(theme, &params());

        assert_eq!(first, second);
        assert_eq!(theme, &before);
    }

    #[test]
    fn test_compile_does_not_leak_between_calls() {
        let theme = Theme::builtin(ThemeId::Default);
        let indented = compile(theme, &ThemeParams { use_indent: true, ..params() });
        let plain = compile(theme, &params());

        assert_eq!(
            indented.get(ElementKind::P).map(|p| p["text-indent"].as_str()),
            Some("2em")
        );
        assert!(!plain.get(ElementKind::P).unwrap().contains_key("text-indent"));
    }

    #[test]
    fn test_dynamic_params_in_every_entry() {
        let styles = compile(Theme::builtin(ThemeId::Grace), &params());
        assert!(!styles.is_empty());
        for kind in ElementKind::ALL {
            let Some(props) = styles.get(kind) else { continue };
            assert_eq!(props[PRIMARY_COLOR_VAR], "#009874", "{kind}");
            assert!(props.contains_key("line-height"), "{kind}");
        }
    }

    #[test]
    fn test_kind_wins_over_base() {
        let theme = Theme::from_toml(
            "[base]\ncolor = \"black\"\nfont-size = \"99px\"\n[block.h1]\nfont-size = \"2em\"\n",
        )
        .unwrap();
        let styles = compile(&theme, &params());
        let h1 = styles.get(ElementKind::H1).unwrap();
        assert_eq!(h1["font-size"], "2em");
        assert_eq!(h1["color"], "black");
        assert_eq!(h1["font-family"], "serif");
    }

    #[test]
    fn test_indent_yields_to_theme_value() {
        let theme = Theme::from_toml("[block.p]\ntext-indent = \"0\"\n").unwrap();
        let styles = compile(&theme, &ThemeParams { use_indent: true, ..params() });
        assert_eq!(styles.get(ElementKind::P).unwrap()["text-indent"], "0");
    }

    #[test]
    fn test_missing_kind_has_no_entry() {
        let theme = Theme::from_toml("[block.h1]\ncolor = \"red\"\n").unwrap();
        let styles = compile(&theme, &params());
        assert!(styles.get(ElementKind::H2).is_none());
        assert_eq!(styles.attr(ElementKind::H2), "");
        assert_eq!(styles.len(), 1);
    }

    #[test]
    fn test_alert_kinds_inherit_family_root() {
        let theme = Theme::from_toml(
            "[block.blockquote]\npadding = \"1em\"\ncolor = \"gray\"\n\
             [block.blockquote_warning]\ncolor = \"orange\"\n",
        )
        .unwrap();
        let styles = compile(&theme, &params());
        let warning = styles.get(ElementKind::BlockquoteWarning).unwrap();
        assert_eq!(warning["padding"], "1em");
        assert_eq!(warning["color"], "orange");
        assert_eq!(
            styles.get(ElementKind::BlockquoteNote).unwrap()["color"],
            "gray"
        );
    }

    #[test]
    fn test_user_css_wins_over_theme() {
        let theme = Theme::builtin(ThemeId::Default)
            .with_overrides(&css_to_rules("h1 { color: red; } p { font-size: 20px }"));
        let styles = compile(&theme, &params());
        assert_eq!(styles.get(ElementKind::H1).unwrap()["color"], "red");
        assert_eq!(styles.get(ElementKind::P).unwrap()["font-size"], "20px");
    }

    #[test]
    fn test_attr_serialization() {
        let theme = Theme::from_toml("[inline.em]\nfont-style = \"italic\"\n").unwrap();
        let styles = compile(
            &theme,
            &ThemeParams {
                font_family: "\"Fira Code\", monospace".to_owned(),
                ..params()
            },
        );
        assert_eq!(
            styles.attr(ElementKind::Em),
            " style=\"--md-primary-color: #009874; font-family: &quot;Fira Code&quot;, monospace; \
             font-size: 14px; font-style: italic\""
        );
        assert_eq!(
            styles.attr_with(ElementKind::Em, ";margin-top: 0"),
            " style=\"--md-primary-color: #009874; font-family: &quot;Fira Code&quot;, monospace; \
             font-size: 14px; font-style: italic;margin-top: 0\""
        );
    }
}
