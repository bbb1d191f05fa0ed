//! Response DTOs
//!
//! View data handed to rendering, plus the JSON bodies of the service
//! endpoints.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::pokemon::{PokemonRecord, StatSlot, TypeSlot};

/// View data for one Pokemon. Only the name is reformatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PokemonView {
    /// Display-cased name ("Mr Mime")
    pub name: String,
    pub id: u32,
    pub stats: Vec<StatSlot>,
    pub types: Vec<TypeSlot>,
}

impl From<PokemonRecord> for PokemonView {
    fn from(record: PokemonRecord) -> Self {
        Self {
            name: record.display_name(),
            id: record.id,
            stats: record.stats,
            types: record.types,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub total_entries: usize,
    /// hits / (hits + misses)
    pub hit_rate: f64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
