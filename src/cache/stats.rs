//! Cache Statistics Module

use serde::Serialize;

// == Cache Stats ==
/// Lookup and eviction counters for one store.
///
/// `total_entries` is filled in when a snapshot is taken.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,
    /// Lookups that found nothing (absent or expired)
    pub misses: u64,
    /// Entries dropped to make room
    pub evictions: u64,
    pub total_entries: usize,
}

impl CacheStats {
    /// Counts one lookup outcome.
    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn lookups(&self) -> u64 {
        self.hits + self.misses
    }

    /// hits / lookups, or 0.0 before the first lookup.
    pub fn hit_rate(&self) -> f64 {
        match self.lookups() {
            0 => 0.0,
            total => self.hits as f64 / total as f64,
        }
    }
}
