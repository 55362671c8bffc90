//! Cached record set with time-to-live.
//!
//! One swappable entry keyed by source URL. Readers share the current set
//! behind an `Arc`; a refresh builds a new set and replaces the reference
//! in a single swap, so no reader ever observes a partially updated set.

use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use crate::model::RecordSet;

struct CacheEntry {
    url: String,
    fetched_at: Instant,
    set: Arc<RecordSet>,
}

/// TTL cache holding the most recently loaded record set.
pub struct SheetCache {
    ttl: Duration,
    entry: RwLock<Option<CacheEntry>>,
}

impl SheetCache {
    /// Creates an empty cache with the given time-to-live.
    pub fn new(ttl: Duration) -> Self {
        SheetCache {
            ttl,
            entry: RwLock::new(None),
        }
    }

    /// The cached set for `url`, if present and still within its TTL.
    pub fn fresh(&self, url: &str) -> Option<Arc<RecordSet>> {
        let entry = self.entry.read().unwrap();
        entry
            .as_ref()
            .filter(|e| e.url == url && e.fetched_at.elapsed() <= self.ttl)
            .map(|e| Arc::clone(&e.set))
    }

    /// The last good set for `url` regardless of age.
    ///
    /// Used when a refresh fails: stale data beats an empty state.
    pub fn last_good(&self, url: &str) -> Option<Arc<RecordSet>> {
        let entry = self.entry.read().unwrap();
        entry
            .as_ref()
            .filter(|e| e.url == url)
            .map(|e| Arc::clone(&e.set))
    }

    /// Stores a freshly loaded set for `url`, replacing any previous entry.
    pub fn store(&self, url: &str, set: Arc<RecordSet>) {
        let mut entry = self.entry.write().unwrap();
        *entry = Some(CacheEntry {
            url: url.to_string(),
            fetched_at: Instant::now(),
            set,
        });
    }

    /// Drops the cached entry, forcing the next load to refetch.
    pub fn invalidate(&self) {
        let mut entry = self.entry.write().unwrap();
        *entry = None;
    }
}
