//! Diagram caching infrastructure.
//!
//! Provides a trait for diagram caching and implementations:
//! - [`DiagramCache`]: Trait for cache implementations
//! - [`NullCache`]: No-op cache (disabled caching)
//! - [`MemoryCache`]: In-process cache
//! - [`FileCache`]: File-based cache shared between runs

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use sha2::{Digest, Sha256};

/// Diagram parameters for cache key computation.
///
/// Contains all parameters that affect the rendered diagram output.
#[derive(Debug, Clone, Copy)]
pub struct DiagramKey<'a> {
    /// Diagram source code.
    pub source: &'a str,
    /// Kroki endpoint (e.g., "mermaid").
    pub endpoint: &'a str,
    /// Output format.
    pub format: &'a str,
}

impl DiagramKey<'_> {
    /// SHA-256 of `"{endpoint}:{format}:{source}"`, hex encoded.
    #[must_use]
    pub fn compute_hash(&self) -> String {
        let content = format!("{}:{}:{}", self.endpoint, self.format, self.source);
        let mut hasher = Sha256::new();
        hasher.update(content.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Trait for diagram caching implementations.
///
/// Cached SVG is stored before an element id is assigned, so one entry
/// serves the same diagram at any position in any document.
pub trait DiagramCache: Send + Sync {
    fn get(&self, key: DiagramKey<'_>) -> Option<String>;

    fn set(&self, key: DiagramKey<'_>, content: &str);
}

/// No-op cache implementation.
#[derive(Debug, Default)]
pub struct NullCache;

impl DiagramCache for NullCache {
    fn get(&self, _key: DiagramKey<'_>) -> Option<String> {
        None
    }

    fn set(&self, _key: DiagramKey<'_>, _content: &str) {}
}

/// In-process cache keyed by content hash.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, String>>,
}

impl DiagramCache for MemoryCache {
    fn get(&self, key: DiagramKey<'_>) -> Option<String> {
        self.entries.lock().unwrap().get(&key.compute_hash()).cloned()
    }

    fn set(&self, key: DiagramKey<'_>, content: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.compute_hash(), content.to_owned());
    }
}

/// File-based diagram cache.
///
/// File naming: `{hash}.{format}` (e.g., `abc123.svg`).
#[derive(Debug)]
pub struct FileCache {
    cache_dir: PathBuf,
}

impl FileCache {
    #[must_use]
    pub fn new(cache_dir: PathBuf) -> Self {
        Self { cache_dir }
    }
}

impl DiagramCache for FileCache {
    fn get(&self, key: DiagramKey<'_>) -> Option<String> {
        let path = self
            .cache_dir
            .join(format!("{}.{}", key.compute_hash(), key.format));
        fs::read_to_string(path).ok()
    }

    fn set(&self, key: DiagramKey<'_>, content: &str) {
        let path = self
            .cache_dir
            .join(format!("{}.{}", key.compute_hash(), key.format));
        if let Err(e) = fs::create_dir_all(&self.cache_dir) {
            tracing::debug!(dir = %self.cache_dir.display(), error = %e, "Failed to create diagram cache directory");
            return;
        }
        if let Err(e) = fs::write(&path, content) {
            tracing::debug!(path = %path.display(), error = %e, "Failed to write diagram cache");
        }
    }
}
