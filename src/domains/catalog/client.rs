//! Discogs API client.
//!
//! [`DiscogsApi`] is the seam between the catalog operations and the remote
//! service. Search and release lookups are blocking calls and must run on a
//! blocking-capable thread (see [`CatalogService`](super::CatalogService));
//! marketplace stats are fetched with the async client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;
use tracing::{debug, info};

use super::error::{ApiError, ApiResult};
use super::model::RawRelease;
use crate::core::config::DiscogsConfig;

/// Client identifier sent with every request.
pub const USER_AGENT: &str = "DiscogsGeminiClient/1.0";

/// Fixed timeout for marketplace stats requests.
pub const MARKETPLACE_TIMEOUT: Duration = Duration::from_secs(10);

/// Page size requested from the search endpoint. Only the first page is read.
const SEARCH_PAGE_SIZE: &str = "25";

/// Remote operations the catalog service depends on.
#[async_trait]
pub trait DiscogsApi: Send + Sync {
    /// Search the database. Blocking.
    ///
    /// Returns the raw result items in API order.
    fn search(&self, query: &str) -> ApiResult<Vec<Value>>;

    /// Fetch a release by id. Blocking.
    fn release(&self, release_id: u64) -> ApiResult<RawRelease>;

    /// Fetch marketplace stats for a release. An empty `currency` leaves the
    /// choice to the API.
    async fn marketplace_stats(&self, release_id: u64, currency: &str) -> ApiResult<Value>;
}

/// HTTP implementation of [`DiscogsApi`] against `api.discogs.com`.
pub struct DiscogsClient {
    base_url: String,
    token: Option<String>,
    blocking: reqwest::blocking::Client,
    http: reqwest::Client,
}

impl DiscogsClient {
    /// Build a client from configuration.
    ///
    /// This constructs a blocking reqwest client and therefore must not be
    /// called from within an async context. Use [`DiscogsClient::connect`]
    /// there instead.
    pub fn new(config: &DiscogsConfig) -> ApiResult<Self> {
        let mut blocking = reqwest::blocking::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = config.timeout_secs {
            blocking = blocking.timeout(Duration::from_secs(secs));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(MARKETPLACE_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.is_empty()),
            blocking: blocking.build()?,
            http,
        })
    }

    /// Build a client from within an async context.
    pub async fn connect(config: DiscogsConfig) -> ApiResult<Self> {
        tokio::task::spawn_blocking(move || Self::new(&config))
            .await
            .map_err(|e| ApiError::Worker(e.to_string()))?
    }

    /// Whether requests carry an `Authorization` header.
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// The marketplace stats URL for a release, with the currency appended
    /// when non-empty.
    pub fn marketplace_url(&self, release_id: u64, currency: &str) -> ApiResult<String> {
        let mut url = format!("{}/marketplace/stats/{}", self.base_url, release_id);
        if !currency.is_empty() {
            url.push('?');
            url.push_str(&serde_urlencoded::to_string([("curr_abbr", currency)])?);
        }
        Ok(url)
    }

    fn auth_header(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("Discogs token={}", token))
    }

    /// Blocking GET returning the parsed JSON body.
    fn get_json(&self, url: &str, query: &[(&str, &str)]) -> ApiResult<Value> {
        debug!("Discogs API: GET {} {:?}", url, query);

        let mut request = self.blocking.get(url).query(query);
        if let Some(auth) = self.auth_header() {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::status(status.as_u16(), body));
        }

        let bytes = response.bytes()?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl DiscogsApi for DiscogsClient {
    fn search(&self, query: &str) -> ApiResult<Vec<Value>> {
        let url = format!("{}/database/search", self.base_url);
        let body = self.get_json(&url, &[("q", query), ("per_page", SEARCH_PAGE_SIZE)])?;

        let results = match body {
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => return Err(ApiError::UnexpectedShape("a search response object")),
        };

        info!("Discogs search returned {} raw result(s)", results.len());
        Ok(results)
    }

    fn release(&self, release_id: u64) -> ApiResult<RawRelease> {
        let url = format!("{}/releases/{}", self.base_url, release_id);
        RawRelease::from_value(self.get_json(&url, &[])?)
    }

    async fn marketplace_stats(&self, release_id: u64, currency: &str) -> ApiResult<Value> {
        let url = self.marketplace_url(release_id, currency)?;
        debug!("Discogs API: GET {}", url);

        let mut request = self.http.get(&url);
        if let Some(auth) = self.auth_header() {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(status.as_u16(), body));
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
