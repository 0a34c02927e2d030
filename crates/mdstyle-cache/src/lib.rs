//! Cache of remote code theme stylesheets.
//!
//! Highlighting themes are plain CSS files served from a CDN. Exported
//! documents inline the selected theme, so each stylesheet is fetched once per
//! process and then served from memory.
//!
//! - [`StylesheetFetcher`]: Source of stylesheet text
//! - [`HttpFetcher`]: Fetcher for a CDN URL pattern
//! - [`StylesheetCache`]: Thread-safe memoizing cache over a fetcher
//!
//! # Example
//!
//! ```
//! use mdstyle_cache::{FetchError, StylesheetCache, StylesheetFetcher};
//!
//! struct Inline;
//!
//! impl StylesheetFetcher for Inline {
//!     fn fetch(&self, theme_id: &str) -> Result<String, FetchError> {
//!         Ok(format!(".hljs {{ /* {theme_id} */ }}"))
//!     }
//! }
//!
//! let cache = StylesheetCache::new(Inline);
//! assert_eq!(cache.get_or_fetch("github"), ".hljs { /* github */ }");
//! ```

mod cache;
mod http;

use std::sync::Arc;

pub use cache::StylesheetCache;
pub use http::{DEFAULT_STYLESHEET_URL, HttpFetcher, create_agent};

/// Stylesheet fetch error.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("HTTP error fetching {url}: {message}")]
    Http { url: String, message: String },
    #[error("HTTP {status} fetching {url}")]
    Status { url: String, status: u16 },
    #[error("Failed to read stylesheet from {url}: {message}")]
    Body { url: String, message: String },
}

/// Source of code theme stylesheets.
pub trait StylesheetFetcher: Send + Sync {
    /// Fetch the stylesheet text for `theme_id`.
    fn fetch(&self, theme_id: &str) -> Result<String, FetchError>;
}

impl<T: StylesheetFetcher + ?Sized> StylesheetFetcher for Arc<T> {
    fn fetch(&self, theme_id: &str) -> Result<String, FetchError> {
        (**self).fetch(theme_id)
    }
}

impl<T: StylesheetFetcher + ?Sized> StylesheetFetcher for Box<T> {
    fn fetch(&self, theme_id: &str) -> Result<String, FetchError> {
        (**self).fetch(theme_id)
    }
}
