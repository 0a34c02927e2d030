//! Memoizing stylesheet cache.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use crate::StylesheetFetcher;

/// Process-lifetime stylesheet cache.
///
/// Successful fetches are kept forever. Failed fetches yield an empty
/// stylesheet and are not cached, so a later call retries. At most one fetch
/// per theme id is in flight; callers asking for the same id wait for it,
/// callers asking for other ids proceed independently.
pub struct StylesheetCache<F> {
    fetcher: F,
    entries: RwLock<HashMap<String, Arc<str>>>,
    /// Per-theme locks serializing fetches of the same id.
    in_flight: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<F: StylesheetFetcher> StylesheetCache<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            entries: RwLock::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Stylesheet text for `theme_id`, fetching it on first use.
    ///
    /// Returns an empty string when the fetch fails.
    ///
    /// # Panics
    ///
    /// Panics if internal locks are poisoned.
    pub fn get_or_fetch(&self, theme_id: &str) -> String {
        // Fast path: cached
        if let Some(text) = self.cached(theme_id) {
            tracing::debug!(theme_id, "Stylesheet cache hit");
            return text.to_string();
        }

        // Slow path: serialize fetches of this id
        let key_lock = self.key_lock(theme_id);
        let text = {
            let _guard = key_lock.lock().unwrap();
            self.fetch_locked(theme_id)
        };
        self.release_key_lock(theme_id, &key_lock);
        text
    }

    fn fetch_locked(&self, theme_id: &str) -> String {
        // Double-check after acquiring lock
        if let Some(text) = self.cached(theme_id) {
            tracing::debug!(theme_id, "Stylesheet fetched by another caller");
            return text.to_string();
        }

        tracing::debug!(theme_id, "Stylesheet cache miss");
        match self.fetcher.fetch(theme_id) {
            Ok(text) => {
                tracing::info!(theme_id, bytes = text.len(), "Cached code theme stylesheet");
                self.entries
                    .write()
                    .unwrap()
                    .insert(theme_id.to_owned(), Arc::from(text.as_str()));
                text
            }
            Err(e) => {
                tracing::warn!(theme_id, error = %e, "Failed to fetch code theme stylesheet");
                String::new()
            }
        }
    }

    /// Warm the cache for `theme_id`. Returns whether it is now cached.
    pub fn prefetch(&self, theme_id: &str) -> bool {
        self.get_or_fetch(theme_id);
        self.cached(theme_id).is_some()
    }

    /// Whether `theme_id` is cached.
    pub fn contains(&self, theme_id: &str) -> bool {
        self.cached(theme_id).is_some()
    }

    fn cached(&self, theme_id: &str) -> Option<Arc<str>> {
        self.entries.read().unwrap().get(theme_id).map(Arc::clone)
    }

    fn key_lock(&self, theme_id: &str) -> Arc<Mutex<()>> {
        let mut in_flight = self.in_flight.lock().unwrap();
        Arc::clone(in_flight.entry(theme_id.to_owned()).or_default())
    }

    /// Drop the per-key lock once no other caller is waiting on it.
    fn release_key_lock(&self, theme_id: &str, key_lock: &Arc<Mutex<()>>) {
        let mut in_flight = self.in_flight.lock().unwrap();
        let idle = in_flight
            .get(theme_id)
            .is_some_and(|lock| Arc::ptr_eq(lock, key_lock) && Arc::strong_count(lock) == 2);
        if idle {
            in_flight.remove(theme_id);
        }
    }
}
