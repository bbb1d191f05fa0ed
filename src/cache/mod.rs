//! Cache Module
//!
//! Process-local cache-aside storage with TTL expiration and LRU eviction.

mod entry;
mod lru;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use stats::CacheStats;
pub use store::CacheStore;

/// A cache store shared across request handlers and background tasks.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;

/// Wraps a fresh store for sharing.
pub fn shared<V: Clone>(max_entries: usize) -> SharedCache<V> {
    Arc::new(RwLock::new(CacheStore::new(max_entries)))
}
