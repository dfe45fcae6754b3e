//! Keyed response cache shared by everything that loads API data.
//!
//! DESIGN
//! ======
//! Entries are keyed by request path. `clear` drops every entry at once and
//! bumps a generation counter, so a request that started before the clear
//! can tell its result is stale and skip the insert.

#[cfg(test)]
#[path = "cache_test.rs"]
mod cache_test;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::net::types::Payload;

#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub payload: Payload,
    pub fetched_at: Instant,
}

#[derive(Debug, Default)]
struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    generation: u64,
}

/// Cheap to clone; all clones see the same entries.
#[derive(Clone, Debug, Default)]
pub struct ResponseCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl ResponseCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<Payload> {
        self.lock().entries.get(key).map(|entry| entry.payload.clone())
    }

    /// Entry for `key` if it was fetched less than `max_age` ago.
    #[must_use]
    pub fn get_fresh(&self, key: &str, max_age: Duration) -> Option<Payload> {
        self.get_fresh_at(key, max_age, Instant::now())
    }

    #[must_use]
    pub fn get_fresh_at(&self, key: &str, max_age: Duration, now: Instant) -> Option<Payload> {
        let inner = self.lock();
        let entry = inner.entries.get(key)?;
        (now.saturating_duration_since(entry.fetched_at) < max_age).then(|| entry.payload.clone())
    }

    pub fn insert(&self, key: &str, payload: Payload) {
        self.insert_at(key, payload, Instant::now());
    }

    pub fn insert_at(&self, key: &str, payload: Payload, fetched_at: Instant) {
        self.lock().entries.insert(key.to_owned(), CacheEntry { payload, fetched_at });
    }

    pub fn remove(&self, key: &str) -> Option<Payload> {
        self.lock().entries.remove(key).map(|entry| entry.payload)
    }

    /// Cached keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.lock().entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Drop every entry. Returns how many were removed.
    pub fn clear(&self) -> usize {
        let mut inner = self.lock();
        let removed = inner.entries.len();
        inner.entries.clear();
        inner.generation += 1;
        removed
    }

    /// Number of `clear` calls so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.lock().generation
    }

    /// Insert only if no `clear` happened since `generation` was read.
    /// Returns whether the entry was stored.
    pub fn insert_if_current(&self, key: &str, payload: Payload, generation: u64) -> bool {
        let mut inner = self.lock();
        if inner.generation != generation {
            return false;
        }
        inner.entries.insert(key.to_owned(), CacheEntry { payload, fetched_at: Instant::now() });
        true
    }
}
