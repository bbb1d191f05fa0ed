//! Pokemon Module
//!
//! Lookup-key parsing, record types, the cache-aside resolver and the
//! random picker.

mod key;
mod picker;
mod record;
mod resolver;

#[cfg(test)]
mod property_tests;
#[cfg(test)]
pub(crate) mod testing;

pub use key::LookupKey;
pub use picker::{draw_id, RandomPicker, COUNT_CACHE_KEY};
pub use record::{display_name, NamedResource, PokemonRecord, StatSlot, TypeSlot};
pub use resolver::{record_cache_key, Resolver};
