//! API Handlers
//!
//! Page handlers, the JSON lookup API, and service endpoints.
//!
//! Page handlers never let a lookup failure escape: every failure becomes a
//! notice plus a redirect or re-render.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, HeaderMap},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use serde_json::Value;
use tracing::{info, warn};

use super::views;
use crate::cache::{self, SharedCache};
use crate::config::Config;
use crate::error::{LookupError, Result};
use crate::models::{HealthResponse, PokemonView, SearchForm, StatsResponse};
use crate::pokemon::{LookupKey, PokemonRecord, RandomPicker, Resolver};
use crate::session::{SessionData, SessionToken, Sessions};
use crate::upstream::{HttpPokeApi, PokeApi};

/// Notice shown on the landing page when a search hits an upstream problem.
const FETCH_FAILED_NOTICE: &str = "An error occurred while fetching data.";
const SEARCH_FIRST_NOTICE: &str = "Search for a Pokemon first!";
/// Notice shown on the error page when no random Pokemon can be picked.
const RANDOM_FAILED_NOTICE: &str = "An error occurred while fetching data. Please try again later.";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream response cache, shared by the resolver and picker
    pub cache: SharedCache<Value>,
    pub resolver: Resolver,
    pub picker: RandomPicker,
    pub sessions: Sessions,
}

impl AppState {
    /// Wires the services around a given upstream client.
    pub fn new(api: Arc<dyn PokeApi>, config: &Config) -> Self {
        let cache = cache::shared(config.max_entries);
        let resolver = Resolver::new(api.clone(), cache.clone(), config.record_ttl());
        let picker = RandomPicker::new(api, cache.clone(), resolver.clone(), config.count_ttl());
        let sessions = Sessions::new(
            config.secret_key.clone(),
            config.session_ttl(),
            config.max_sessions,
        );

        Self {
            cache,
            resolver,
            picker,
            sessions,
        }
    }

    /// Creates AppState talking to the configured PokeAPI over HTTP.
    pub fn from_config(config: &Config) -> Self {
        Self::new(Arc::new(HttpPokeApi::new(&config.api_base_url)), config)
    }

    async fn lookup(&self, form: &SearchForm) -> Result<PokemonRecord> {
        let key = form.lookup_key()?;
        self.resolver.resolve(&key).await
    }
}

/// Saves the session and, if it was stored, attaches its cookie.
async fn finish(
    sessions: &Sessions,
    token: SessionToken,
    data: SessionData,
    body: impl IntoResponse,
) -> Response {
    if sessions.save(&token, data).await {
        ([(header::SET_COOKIE, sessions.cookie(&token))], body).into_response()
    } else {
        body.into_response()
    }
}

/// Handler for GET /
///
/// Shows one random Pokemon. If none can be picked, the visitor is sent to
/// the error page.
pub async fn index_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (token, mut session) = state.sessions.load(&headers).await;

    match state.picker.pick().await {
        Ok(record) => {
            let notices = session.take_notices();
            let html = views::index_page(Some(&PokemonView::from(record)), &notices);
            finish(&state.sessions, token, session, Html(html)).await
        }
        Err(err) => {
            warn!(error = %err, "random pick failed");
            session.flash(RANDOM_FAILED_NOTICE);
            finish(&state.sessions, token, session, Redirect::to("/error")).await
        }
    }
}

/// Handler for POST /
///
/// Resolves the search first. Success starts a fresh session holding the
/// result and redirects to the search page; failure re-renders the landing
/// page with a notice and, if one can be picked, a random example.
pub async fn index_search_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    let (token, mut session) = state.sessions.load(&headers).await;

    match state.lookup(&form).await {
        Ok(record) => {
            info!(id = record.id, name = %record.name, "search resolved");
            let fresh = SessionData {
                last_result: Some(record.into()),
                notices: Vec::new(),
            };
            finish(&state.sessions, token, fresh, Redirect::to("/pokemon")).await
        }
        Err(err) => {
            info!(error = %err, "search failed");
            let notice = match err {
                LookupError::InvalidInput(_) | LookupError::NotFound(_) => err.notice(),
                LookupError::Upstream(_) | LookupError::Network(_) => FETCH_FAILED_NOTICE,
            };

            let random = match state.picker.pick().await {
                Ok(record) => Some(PokemonView::from(record)),
                Err(pick_err) => {
                    warn!(error = %pick_err, "random pick failed");
                    None
                }
            };

            let mut notices = session.take_notices();
            notices.push(notice.to_string());
            let html = views::index_page(random.as_ref(), &notices);
            finish(&state.sessions, token, session, Html(html)).await
        }
    }
}

/// Handler for GET /pokemon
///
/// Renders the most recent search result held in the session.
pub async fn search_page_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (token, mut session) = state.sessions.load(&headers).await;

    match session.last_result.clone() {
        Some(view) => {
            let notices = session.take_notices();
            let html = views::search_page(&view, &notices);
            finish(&state.sessions, token, session, Html(html)).await
        }
        None => {
            session.flash(SEARCH_FIRST_NOTICE);
            finish(&state.sessions, token, session, Redirect::to("/")).await
        }
    }
}

/// Handler for POST /pokemon
///
/// Resolves and renders directly; failures redirect with a notice.
pub async fn search_submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<SearchForm>,
) -> Response {
    let (token, mut session) = state.sessions.load(&headers).await;

    match state.lookup(&form).await {
        Ok(record) => {
            info!(id = record.id, name = %record.name, "search resolved");
            let view = PokemonView::from(record);
            let notices = session.take_notices();
            let html = views::search_page(&view, &notices);
            session.last_result = Some(view);
            finish(&state.sessions, token, session, Html(html)).await
        }
        Err(err) => {
            info!(error = %err, "search failed");
            session.flash(err.notice());
            let target = err.redirect_target();
            finish(&state.sessions, token, session, Redirect::to(target)).await
        }
    }
}

/// Handler for GET /error
pub async fn error_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let (token, mut session) = state.sessions.load(&headers).await;
    let notices = session.take_notices();
    finish(&state.sessions, token, session, Html(views::error_page(&notices))).await
}

/// Handler for GET /static/main.js
pub async fn script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        views::MAIN_JS,
    )
}

/// Handler for GET /api/pokemon/:query
pub async fn api_lookup_handler(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<PokemonView>> {
    let key = LookupKey::parse(&query)?;
    let record = state.resolver.resolve(&key).await?;
    Ok(Json(record.into()))
}

/// Handler for GET /api/random
pub async fn api_random_handler(State(state): State<AppState>) -> Result<Json<PokemonView>> {
    let record = state.picker.pick().await?;
    Ok(Json(record.into()))
}

/// Handler for GET /stats
///
/// Statistics of the upstream response cache.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.cache.read().await.stats();
    Json(stats.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
