//! Request DTOs
//!
//! Defines the structure of incoming form bodies.

use serde::Deserialize;

use crate::error::Result;
use crate::pokemon::LookupKey;

/// Search form posted to `/` and `/pokemon`.
///
/// A missing `pokemon` field is treated as an empty search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub pokemon: String,
}

impl SearchForm {
    /// Validates the submitted term.
    pub fn lookup_key(&self) -> Result<LookupKey> {
        LookupKey::parse(&self.pokemon)
    }
}
