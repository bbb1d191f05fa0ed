//! Upstream Module
//!
//! Access to the PokeAPI REST service.
//!
//! # Paths
//! - `pokemon/{id}` - full record (`id`, `name`, `stats`, `types`)
//! - `pokemon-species/{name}` - species record carrying the canonical `id`
//! - `pokemon-species/` - listing carrying the species `count`

mod http;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use http::HttpPokeApi;

/// Issues one GET per call and classifies the outcome.
///
/// Implementations must map a 404 to `NotFound`, any other non-2xx status or
/// an unparsable body to `Upstream`, and transport failures to `Network`.
#[async_trait]
pub trait PokeApi: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Value>;
}

pub fn record_path(id: u32) -> String {
    format!("pokemon/{}", id)
}

/// Callers must check the name with [`is_resource_name`] first.
pub fn species_path(name: &str) -> String {
    format!("pokemon-species/{}", name)
}

/// True if `name` can name an upstream resource as a single path segment.
///
/// Resource names are lowercase ASCII letters, digits and hyphens. Anything
/// else cannot match a resource and may change which endpoint a request
/// reaches (`/`, `?`, `#`, `..`).
pub fn is_resource_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

pub const SPECIES_LIST_PATH: &str = "pokemon-species/";
