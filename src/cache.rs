//! Memoization for resolved colors and icon lookups.
//!
//! Entries are never expired. Whoever owns the cache must call
//! [`ResolutionCache::clear`] when the theme or environment changes,
//! otherwise stale values keep being served.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A cached outcome. `NotFound` records a failed lookup so it is not retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cached<V> {
    Hit(V),
    NotFound,
}

impl<V> Cached<V> {
    pub fn into_option(self) -> Option<V> {
        match self {
            Cached::Hit(value) => Some(value),
            Cached::NotFound => None,
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self, Cached::Hit(_))
    }
}

impl<V> From<Option<V>> for Cached<V> {
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => Cached::Hit(value),
            None => Cached::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug)]
pub struct ResolutionCache<V> {
    entries: Mutex<HashMap<String, Cached<V>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<V: Clone> ResolutionCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Cached<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &str) -> Option<Cached<V>> {
        let found = self.lock().get(key).cloned();
        let counter = if found.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        found
    }

    pub fn put(&self, key: impl Into<String>, value: Cached<V>) {
        self.lock().insert(key.into(), value);
    }

    /// Look `key` up, computing and storing it on a miss.
    ///
    /// The lock is not held while `compute` runs, so two callers racing on
    /// the same key may both compute; the later write wins with an equal value.
    pub fn get_or_insert_with(&self, key: &str, compute: impl FnOnce() -> Cached<V>) -> Cached<V> {
        if let Some(found) = self.get(key) {
            return found;
        }
        let value = compute();
        self.put(key, value.clone());
        value
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

impl<V: Clone> Default for ResolutionCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
