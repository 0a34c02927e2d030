//! Style themes for inline-styled HTML rendering.
//!
//! A [`Theme`] layers per-element-kind CSS declarations over shared base
//! properties. [`compile`] flattens a theme plus per-render parameters into a
//! [`StyleMap`] the renderer reads `style` attributes from. User CSS is folded
//! in beforehand with [`css_to_rules`] and [`Theme::with_overrides`].
//!
//! # Example
//!
//! ```
//! use mdstyle_theme::{ElementKind, Theme, ThemeId, ThemeParams, compile, css_to_rules};
//!
//! let theme = Theme::builtin(ThemeId::Default)
//!     .with_overrides(&css_to_rules("h1 { color: red }"));
//! let styles = compile(
//!     &theme,
//!     &ThemeParams {
//!         font_family: "serif".to_owned(),
//!         font_size: "16px".to_owned(),
//!         use_indent: false,
//!         primary_color: "#0F4C81".to_owned(),
//!     },
//! );
//! assert!(styles.attr(ElementKind::H1).contains("color: red"));
//! ```

mod compile;
mod css;
mod kind;
mod theme;

pub use compile::{PRIMARY_COLOR_REF, PRIMARY_COLOR_VAR, StyleMap, ThemeParams, compile};
pub use css::{CssRules, css_to_rules};
pub use kind::{AlertVariant, Category, ElementKind, UnknownKind};
pub use theme::{PropertyMap, Theme, ThemeError, ThemeId};
