//! Mermaid diagram rendering via Kroki.
//!
//! [`KrokiRenderer`] implements [`mdstyle_renderer::DiagramRenderer`]: it
//! POSTs diagram source to `{server}/mermaid/svg`, validates the SVG, strips
//! external font imports and assigns the element id requested by the
//! renderer. Rendered SVG is cached by content hash through a
//! [`DiagramCache`].
//!
//! # Example
//!
//! ```no_run
//! use mdstyle_diagrams::{KrokiRenderer, MemoryCache, DEFAULT_TIMEOUT};
//! use mdstyle_renderer::DiagramRenderer;
//!
//! let renderer = KrokiRenderer::new("https://kroki.io", DEFAULT_TIMEOUT)
//!     .with_cache(Box::new(MemoryCache::default()));
//! let svg = renderer.render("graph TD; A-->B", "mermaid-diagram-0").unwrap();
//! assert!(svg.starts_with(r#"<svg id="mermaid-diagram-0""#));
//! ```

mod cache;
mod kroki;
mod svg;

pub use cache::{DiagramCache, DiagramKey, FileCache, MemoryCache, NullCache};
pub use kroki::{DEFAULT_TIMEOUT, KrokiRenderer};
pub use svg::{strip_google_fonts_import, with_svg_id};
