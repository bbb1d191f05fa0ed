//! Request and response models
//!
//! DTOs for form bodies, JSON responses and page view data.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::SearchForm;
pub use responses::{HealthResponse, PokemonView, StatsResponse};
