//! In-memory PokeApi double for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::error::{LookupError, Result};
use crate::upstream::{record_path, species_path, PokeApi, SPECIES_LIST_PATH};

pub fn pokemon_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "stats": [
            {"base_stat": 45, "effort": 0, "stat": {"name": "hp", "url": ""}},
            {"base_stat": 49, "effort": 0, "stat": {"name": "attack", "url": ""}}
        ],
        "types": [
            {"slot": 1, "type": {"name": "normal", "url": ""}}
        ]
    })
}

/// Serves canned payloads by path and records every call.
/// Unknown paths answer `NotFound`.
#[derive(Default)]
pub struct FakePokeApi {
    responses: Mutex<HashMap<String, Value>>,
    failure: Mutex<Option<LookupError>>,
    calls: Mutex<Vec<String>>,
}

impl FakePokeApi {
    pub fn with_pokemon(entries: &[(u32, &str)]) -> Self {
        let api = Self::default();
        for (id, name) in entries {
            api.insert(&record_path(*id), pokemon_json(*id, name));
            api.insert(&species_path(name), json!({"id": id, "name": name}));
        }
        api
    }

    pub fn insert(&self, path: &str, value: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), value);
    }

    pub fn set_count(&self, count: u32) {
        self.insert(SPECIES_LIST_PATH, json!({"count": count, "results": []}));
    }

    /// Makes every subsequent call fail with `err`.
    pub fn fail_with(&self, err: LookupError) {
        *self.failure.lock().unwrap() = Some(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| *p == path).count()
    }
}

#[async_trait]
impl PokeApi for FakePokeApi {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(path.to_string());

        if let Some(err) = self.failure.lock().unwrap().clone() {
            return Err(err);
        }

        self.responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(path.to_string()))
    }
}
