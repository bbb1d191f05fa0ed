//! Pokedex - look up Pokemon by name or ID through a caching PokeAPI proxy
//!
//! Resolves search terms and random picks against the upstream REST API,
//! keeping responses in a process-local TTL cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod pokemon;
pub mod session;
pub mod tasks;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::{ConfigError, LookupError};
pub use tasks::spawn_cleanup_task;
