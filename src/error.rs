//! Error types for the Pokedex service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Lookup Error Enum ==
/// Failure kinds produced while resolving or picking a Pokemon.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// User input rejected before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream reports the entity does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream reachable but answered with an unexpected status or payload
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Transport failure (DNS, connect, reset, timeout)
    #[error("Network error: {0}")]
    Network(String),
}

impl LookupError {
    /// Message shown to the user on HTML pages.
    pub fn notice(&self) -> &'static str {
        match self {
            LookupError::InvalidInput(_) => "Invalid input!",
            LookupError::NotFound(_) => "Pokemon not found!",
            LookupError::Upstream(_) | LookupError::Network(_) => {
                "A network error occurred. Please check your connection and try again."
            }
        }
    }

    /// Page the user is sent to after a failed search.
    pub fn redirect_target(&self) -> &'static str {
        match self {
            LookupError::InvalidInput(_) | LookupError::NotFound(_) => "/",
            LookupError::Upstream(_) | LookupError::Network(_) => "/error",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = match &self {
            LookupError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Upstream(_) => StatusCode::BAD_GATEWAY,
            LookupError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Config Error Enum ==
/// Startup configuration problems.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is absent or empty
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    /// A variable is present but cannot be parsed
    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },

    /// Count entries must outlive record entries
    #[error("COUNT_TTL ({count_ttl}s) must be longer than RECORD_TTL ({record_ttl}s)")]
    TtlOrdering { record_ttl: u64, count_ttl: u64 },
}

// == Result Type Alias ==
/// Convenience Result type for lookups.
pub type Result<T> = std::result::Result<T, LookupError>;
