//! reqwest-backed PokeAPI client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{LookupError, Result};
use crate::upstream::PokeApi;

/// PokeAPI client over HTTP. No retries.
#[derive(Debug, Clone)]
pub struct HttpPokeApi {
    base_url: String,
    http: reqwest::Client,
}

impl HttpPokeApi {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: &str, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Full URL for a path relative to the base.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl PokeApi for HttpPokeApi {
    async fn fetch(&self, path: &str) -> Result<Value> {
        let url = self.url_for(path);
        debug!(%url, "fetching from upstream");

        let resp = self.http.get(&url).send().await.map_err(|e| {
            warn!(%url, error = %e, "upstream request failed");
            LookupError::Network(format!("request to {url} failed: {e}"))
        })?;

        classify_status(resp.status(), &url)?;

        let body = resp.bytes().await.map_err(|e| {
            warn!(%url, error = %e, "reading upstream body failed");
            LookupError::Network(format!("reading body from {url} failed: {e}"))
        })?;

        parse_body(&body, &url)
    }
}

fn classify_status(status: StatusCode, url: &str) -> Result<()> {
    if status.is_success() {
        return Ok(());
    }

    warn!(%url, %status, "upstream returned error status");
    if status == StatusCode::NOT_FOUND {
        Err(LookupError::NotFound(url.to_string()))
    } else {
        Err(LookupError::Upstream(format!("{url} returned {status}")))
    }
}

fn parse_body(body: &[u8], url: &str) -> Result<Value> {
    serde_json::from_slice(body).map_err(|e| {
        warn!(%url, error = %e, "upstream returned malformed JSON");
        LookupError::Upstream(format!("malformed JSON from {url}: {e}"))
    })
}
