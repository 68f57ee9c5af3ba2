mod lru;

pub use lru::LruTtlCache;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Scrape results keyed by profile identifier, stored as serialized snapshots.
///
/// Cheaply cloneable; all clones share one underlying cache. The lock is only
/// held for the duration of a single read or write, never across an await.
#[derive(Clone)]
pub struct ResultCache {
    inner: Arc<Mutex<LruTtlCache<String, String>>>,
}

impl ResultCache {
    pub fn new(max_entries: usize, max_age: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LruTtlCache::new(max_entries, max_age))),
        }
    }

    pub fn get(&self, username: &str) -> Option<String> {
        self.lock().get(&username.to_owned()).cloned()
    }

    pub fn set(&self, username: &str, snapshot: String) {
        self.lock().insert(username.to_owned(), snapshot);
    }

    /// Number of cached profiles, counting expired entries not yet evicted.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, LruTtlCache<String, String>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
