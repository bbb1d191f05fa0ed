//! Random Picker
//!
//! Draws a uniformly random Pokemon, bounded by the cached species count.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use serde_json::Value;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::error::{LookupError, Result};
use crate::pokemon::{PokemonRecord, Resolver};
use crate::upstream::{PokeApi, SPECIES_LIST_PATH};

/// Cache key holding the species count.
pub const COUNT_CACHE_KEY: &str = "pokemon_count";

/// Uniform draw over `[1, count]`. `count` must be at least 1.
pub fn draw_id<R: Rng + ?Sized>(rng: &mut R, count: u32) -> u32 {
    rng.gen_range(1..=count)
}

#[derive(Clone)]
pub struct RandomPicker {
    api: Arc<dyn PokeApi>,
    cache: SharedCache<Value>,
    resolver: Resolver,
    count_ttl: Duration,
}

impl RandomPicker {
    pub fn new(
        api: Arc<dyn PokeApi>,
        cache: SharedCache<Value>,
        resolver: Resolver,
        count_ttl: Duration,
    ) -> Self {
        Self {
            api,
            cache,
            resolver,
            count_ttl,
        }
    }

    /// Picks a random record.
    pub async fn pick(&self) -> Result<PokemonRecord> {
        let count = self.species_count().await?;
        let id = {
            let mut rng = rand::thread_rng();
            draw_id(&mut rng, count)
        };
        debug!(id, count, "drew random pokemon id");
        self.resolver.fetch_record(id).await
    }

    /// Species count from cache, fetched and cached with the long TTL on a miss.
    pub async fn species_count(&self) -> Result<u32> {
        let cached = self.cache.write().await.get(COUNT_CACHE_KEY);
        if let Some(value) = cached {
            if let Some(count) = parse_count(&value) {
                return Ok(count);
            }
        }

        let listing = self.api.fetch(SPECIES_LIST_PATH).await?;
        let count = listing
            .get("count")
            .and_then(parse_count)
            .ok_or_else(|| LookupError::Upstream("species listing has no usable count".into()))?;

        self.cache
            .write()
            .await
            .set(COUNT_CACHE_KEY, Value::from(count), self.count_ttl);
        info!(count, "cached species count");

        Ok(count)
    }
}

fn parse_count(value: &Value) -> Option<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| *n > 0)
}
