//! Session Module
//!
//! Server-side session records keyed by a signed, opaque cookie token.
//! Sessions carry the last search result between pages and one-shot
//! notices.

use std::time::Duration;

use axum::http::{header, HeaderMap, HeaderValue};
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::cache::{self, SharedCache};
use crate::models::PokemonView;

pub const SESSION_COOKIE: &str = "pokedex_session";

/// Per-visitor state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionData {
    /// Most recently resolved search result
    pub last_result: Option<PokemonView>,
    /// Notices waiting to be shown once
    pub notices: Vec<String>,
}

impl SessionData {
    pub fn flash(&mut self, notice: impl Into<String>) {
        self.notices.push(notice.into());
    }

    /// Returns pending notices and clears them.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }
}

/// Opaque session identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Session store plus cookie signing.
#[derive(Clone)]
pub struct Sessions {
    store: SharedCache<SessionData>,
    secret: String,
    ttl: Duration,
}

impl Sessions {
    pub fn new(secret: impl Into<String>, ttl: Duration, max_sessions: usize) -> Self {
        Self {
            store: cache::shared(max_sessions),
            secret: secret.into(),
            ttl,
        }
    }

    /// Underlying store, for the cleanup task.
    pub fn store(&self) -> SharedCache<SessionData> {
        self.store.clone()
    }

    /// Loads the session named by the request cookie.
    ///
    /// A missing, tampered or expired cookie yields a fresh empty session
    /// under a new token.
    pub async fn load(&self, headers: &HeaderMap) -> (SessionToken, SessionData) {
        if let Some(token) = self.token_from_headers(headers) {
            let data = self.store.write().await.get(token.as_str());
            if let Some(data) = data {
                return (token, data);
            }
            debug!("session expired, starting a new one");
        }
        (SessionToken::generate(), SessionData::default())
    }

    /// Persists the session and refreshes its expiry.
    ///
    /// An empty session that is not already stored is dropped, so visitors
    /// without state never take a slot. Returns whether anything was stored.
    pub async fn save(&self, token: &SessionToken, data: SessionData) -> bool {
        let mut store = self.store.write().await;
        if data == SessionData::default() && !store.contains_live(token.as_str()) {
            return false;
        }
        store.set(token.as_str(), data, self.ttl);
        true
    }

    /// `Set-Cookie` header value carrying the signed token.
    pub fn cookie(&self, token: &SessionToken) -> HeaderValue {
        let value = format!(
            "{}={}.{}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token.as_str(),
            self.sign(token.as_str()),
            self.ttl.as_secs()
        );
        // Token is a UUID and the signature hex, so the value is always visible ASCII.
        HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    fn sign(&self, token: &str) -> String {
        hex::encode(self.digest(token))
    }

    fn digest(&self, token: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b":");
        hasher.update(token.as_bytes());
        hasher.finalize().to_vec()
    }

    /// Compares decoded signature bytes in constant time.
    fn verify(&self, token: &str, signature: &str) -> bool {
        let Ok(given) = hex::decode(signature) else {
            return false;
        };
        let expected = self.digest(token);
        given.len() == expected.len()
            && given
                .iter()
                .zip(&expected)
                .fold(0u8, |diff, (a, b)| diff | (a ^ b))
                == 0
    }

    fn token_from_headers(&self, headers: &HeaderMap) -> Option<SessionToken> {
        let raw = cookie_value(headers, SESSION_COOKIE)?;
        let (token, signature) = raw.split_once('.')?;

        if Uuid::parse_str(token).is_err() || !self.verify(token, signature) {
            debug!("rejecting session cookie with bad token or signature");
            return None;
        }
        Some(SessionToken(token.to_string()))
    }
}

/// Finds a cookie by name across all `Cookie` headers.
fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
