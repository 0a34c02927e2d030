//! Markdown to inline-styled HTML conversion.
//!
//! [`Converter`] ties the pipeline together: blank input is rejected, front
//! matter is split off, the selected theme is compiled with any user CSS,
//! the body is rendered with every style inlined, and the result is exported
//! as a standalone document with the code theme stylesheet embedded.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use mdstyle_cache::{FetchError, StylesheetCache, StylesheetFetcher};
//! use mdstyle_core::Converter;
//! use mdstyle_renderer::RenderOptions;
//!
//! struct Offline;
//!
//! impl StylesheetFetcher for Offline {
//!     fn fetch(&self, _theme_id: &str) -> Result<String, FetchError> {
//!         Ok(String::new())
//!     }
//! }
//!
//! let fetcher: Box<dyn StylesheetFetcher> = Box::new(Offline);
//! let converter = Converter::new(Arc::new(StylesheetCache::new(fetcher)));
//! let conversion = converter.convert("# Hello", &RenderOptions::default()).unwrap();
//! assert!(conversion.html.starts_with("<html>"));
//! ```

mod converter;

pub use converter::{Conversion, ConvertError, Converter, PREVIEW_TEMPLATE, SharedStylesheetCache};
