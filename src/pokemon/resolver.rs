//! Resolver
//!
//! Turns a validated lookup key into a Pokemon record, consulting the
//! cache before the upstream API.

use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::error::{LookupError, Result};
use crate::pokemon::{LookupKey, PokemonRecord};
use crate::upstream::{is_resource_name, record_path, species_path, PokeApi};

/// Cache key for a record by ID.
pub fn record_cache_key(id: u32) -> String {
    format!("pokemon_{}", id)
}

/// Resolves names and IDs into records using cache-aside.
#[derive(Clone)]
pub struct Resolver {
    api: Arc<dyn PokeApi>,
    cache: SharedCache<Value>,
    record_ttl: Duration,
}

impl Resolver {
    pub fn new(api: Arc<dyn PokeApi>, cache: SharedCache<Value>, record_ttl: Duration) -> Self {
        Self {
            api,
            cache,
            record_ttl,
        }
    }

    /// Resolves a key to its record.
    ///
    /// IDs are used as-is. Names go through the species endpoint to find the
    /// canonical ID first; that lookup is not cached.
    pub async fn resolve(&self, key: &LookupKey) -> Result<PokemonRecord> {
        let id = match key {
            LookupKey::Id(id) => *id,
            LookupKey::Name(name) => self.id_for_name(name).await?,
        };
        self.fetch_record(id).await
    }

    /// Returns the record for `id` from cache, or fetches and caches it.
    pub async fn fetch_record(&self, id: u32) -> Result<PokemonRecord> {
        let cache_key = record_cache_key(id);

        let cached = self.cache.write().await.get(&cache_key);
        if let Some(value) = cached {
            debug!(%cache_key, "cache hit");
            return PokemonRecord::from_value(&value);
        }

        debug!(%cache_key, "cache miss, fetching record");
        let value = self.api.fetch(&record_path(id)).await?;
        let record = PokemonRecord::from_value(&value)?;

        self.cache
            .write()
            .await
            .set(cache_key, value, self.record_ttl);
        info!(id = record.id, name = %record.name, "cached pokemon record");

        Ok(record)
    }

    async fn id_for_name(&self, name: &str) -> Result<u32> {
        if !is_resource_name(name) {
            debug!(name, "name cannot match any species");
            return Err(LookupError::NotFound(format!("no species named {name:?}")));
        }

        let species = self.api.fetch(&species_path(name)).await?;

        species
            .get("id")
            .and_then(Value::as_u64)
            .and_then(|id| u32::try_from(id).ok())
            .filter(|id| *id > 0)
            .ok_or_else(|| {
                LookupError::Upstream(format!("species {name:?} has no usable id"))
            })
    }
}
