//! API Routes
//!
//! Configures the Axum router with the page, JSON and service endpoints.

use axum::{
    http::{header, HeaderValue},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use super::handlers::{
    api_lookup_handler, api_random_handler, error_handler, health_handler, index_handler,
    index_search_handler, script_handler, search_page_handler, search_submit_handler,
    stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET|POST /` - Landing page with a random Pokemon and search form
/// - `GET|POST /pokemon` - Search result page
/// - `GET /error` - Error page
/// - `GET /static/main.js` - Client script
/// - `GET /api/pokemon/:query` - Lookup by name or ID as JSON
/// - `GET /api/random` - Random Pokemon as JSON
/// - `GET /stats` - Upstream cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - Cache-Control: session-backed pages are never stored by caches
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let pages = Router::new()
        .route("/", get(index_handler).post(index_search_handler))
        .route(
            "/pokemon",
            get(search_page_handler).post(search_submit_handler),
        )
        .route("/error", get(error_handler))
        .route_layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    Router::new()
        .merge(pages)
        .route("/static/main.js", get(script_handler))
        .route("/api/pokemon/:query", get(api_lookup_handler))
        .route("/api/random", get(api_random_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
