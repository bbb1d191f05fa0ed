//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with LRU tracking and TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, LruTracker};

// == Cache Store ==
/// Bounded key-value storage with per-entry expiration.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// LRU access tracker
    lru: LruTracker,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    max_entries: usize,
}

impl<V: Clone> CacheStore<V> {
    // == Constructor ==
    /// Creates a new CacheStore holding at most `max_entries` entries.
    ///
    /// A capacity of zero is treated as one.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            lru: LruTracker::new(),
            stats: CacheStats::default(),
            max_entries: max_entries.max(1),
        }
    }

    // == Set ==
    /// Stores a value that expires `ttl` from now.
    ///
    /// An existing entry under the same key is overwritten and its TTL reset.
    /// A new key at capacity evicts the least recently used entry.
    pub fn set(&mut self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();

        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(evicted_key) = self.lru.evict_oldest() {
                trace!(key = %evicted_key, "evicting least recently used entry");
                self.entries.remove(&evicted_key);
                self.stats.record_eviction();
            }
        }

        self.entries.insert(key.clone(), CacheEntry::new(value, ttl));
        self.lru.touch(&key);
    }

    // == Get ==
    /// Returns the value if present and not expired.
    ///
    /// Expired entries are removed and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<V> {
        match self.entries.get(key) {
            Some(entry) if entry.is_expired() => {
                self.entries.remove(key);
                self.lru.remove(key);
                self.stats.record_lookup(false);
                None
            }
            Some(entry) => {
                let value = entry.value.clone();
                self.stats.record_lookup(true);
                self.lru.touch(key);
                Some(value)
            }
            None => {
                self.stats.record_lookup(false);
                None
            }
        }
    }

    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            total_entries: self.entries.len(),
            ..self.stats
        }
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.entries.remove(key);
            self.lru.remove(key);
        }

        expired_keys.len()
    }

    /// Returns true if a live entry exists, without touching LRU order or stats.
    pub fn contains_live(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|entry| !entry.is_expired())
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    const TTL: Duration = Duration::from_secs(300);

    #[test]
    fn test_store_new() {
        let store: CacheStore<String> = CacheStore::new(100);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::new(100);

        store.set("pokemon_25", "pikachu".to_string(), TTL);

        assert_eq!(store.get("pokemon_25").as_deref(), Some("pikachu"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_absent() {
        let mut store: CacheStore<String> = CacheStore::new(100);
        assert!(store.get("pokemon_1").is_none());
    }

    #[test]
    fn test_store_overwrite_resets_value_and_ttl() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), Duration::from_millis(30));
        store.set("key1", "value2".to_string(), TTL);

        sleep(Duration::from_millis(60));

        assert_eq!(store.get("key1").as_deref(), Some("value2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), Duration::from_millis(50));
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(80));

        assert!(store.get("key1").is_none());
        // Lazily evicted on read
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_store_lru_eviction() {
        let mut store = CacheStore::new(3);

        store.set("key1", 1, TTL);
        store.set("key2", 2, TTL);
        store.set("key3", 3, TTL);
        store.set("key4", 4, TTL);

        assert_eq!(store.len(), 3);
        assert!(store.get("key1").is_none());
        assert_eq!(store.get("key2"), Some(2));
        assert_eq!(store.get("key3"), Some(3));
        assert_eq!(store.get("key4"), Some(4));
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_lru_touch_on_get() {
        let mut store = CacheStore::new(3);

        store.set("key1", 1, TTL);
        store.set("key2", 2, TTL);
        store.set("key3", 3, TTL);

        store.get("key1");
        store.set("key4", 4, TTL);

        assert!(store.get("key1").is_some());
        assert!(store.get("key2").is_none());
    }

    #[test]
    fn test_store_zero_capacity_holds_one() {
        let mut store = CacheStore::new(0);
        store.set("a", 1, TTL);
        store.set("b", 2, TTL);

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("b"), Some(2));
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::new(100);

        store.set("key1", "value1".to_string(), TTL);
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = CacheStore::new(100);

        store.set("key1", 1, Duration::from_millis(20));
        store.set("key2", 2, Duration::from_secs(10));

        sleep(Duration::from_millis(50));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_contains_live_does_not_count() {
        let mut store = CacheStore::new(100);
        store.set("key1", 1, TTL);

        assert!(store.contains_live("key1"));
        assert!(!store.contains_live("key2"));

        let stats = store.stats();
        assert_eq!(stats.hits, 0);
        assert_eq!(stats.misses, 0);
    }
}
