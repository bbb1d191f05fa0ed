//! Pokemon record as served by the upstream `pokemon/{id}` endpoint.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{LookupError, Result};

/// `{name, url}` reference used throughout the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSlot {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

/// Canonical fields consumed by callers. Unknown upstream fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonRecord {
    pub id: u32,
    pub name: String,
    pub stats: Vec<StatSlot>,
    pub types: Vec<TypeSlot>,
}

impl PokemonRecord {
    /// Reads a record out of a raw upstream payload.
    pub fn from_value(value: &Value) -> Result<Self> {
        let record: PokemonRecord = serde_json::from_value(value.clone())
            .map_err(|e| LookupError::Upstream(format!("unexpected record shape: {e}")))?;

        if record.id == 0 {
            return Err(LookupError::Upstream("record id must be positive".to_string()));
        }
        Ok(record)
    }

    /// Name formatted for display: hyphens become spaces, words capitalized.
    pub fn display_name(&self) -> String {
        display_name(&self.name)
    }
}

/// `"mr-mime"` becomes `"Mr Mime"`.
pub fn display_name(name: &str) -> String {
    name.replace('-', " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
