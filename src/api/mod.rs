//! API Module
//!
//! HTTP handlers, HTML views and routing.
//!
//! # Endpoints
//! - `GET|POST /` - Landing page
//! - `GET|POST /pokemon` - Search result page
//! - `GET /error` - Error page
//! - `GET /api/pokemon/:query` - JSON lookup
//! - `GET /api/random` - JSON random pick
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;
pub mod views;

pub use handlers::*;
pub use routes::create_router;
