//! Catalog service implementation.
//!
//! The CatalogService owns the long-lived API handle and exposes the three
//! catalog operations. Each one makes at most one remote call, never retries,
//! and reports failures as a [`CatalogError`].

use std::sync::Arc;

use tracing::{info, warn};

use super::client::DiscogsApi;
use super::error::{ApiError, CatalogError, CatalogResult};
use super::model::{MarketplaceStats, ReleaseDetail, SearchResponse};
use super::normalize;

/// Default currency for marketplace lookups.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Service running catalog operations against a [`DiscogsApi`] backend.
///
/// Cloning is cheap; all clones share the same backend.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn DiscogsApi>,
}

impl CatalogService {
    /// Create a new CatalogService over the given backend.
    pub fn new(api: Arc<dyn DiscogsApi>) -> Self {
        info!("Initializing CatalogService");
        Self { api }
    }

    /// Search the catalog, returning at most the first ten hits.
    pub async fn search_catalog(&self, query: &str) -> CatalogResult<SearchResponse> {
        info!("Searching Discogs for: {}", query);

        let api = self.api.clone();
        let owned_query = query.to_string();
        let items = tokio::task::spawn_blocking(move || api.search(&owned_query))
            .await
            .map_err(|e| ApiError::Worker(e.to_string()))
            .and_then(|result| result)
            .map_err(|e| log_failure(CatalogError::search(e)))?;

        let response = normalize::search_response(query, items);
        if response.skipped > 0 {
            warn!(
                "Skipped {} malformed search result(s) for query: {}",
                response.skipped, query
            );
        }
        Ok(response)
    }

    /// Fetch and normalize a release.
    pub async fn get_release_details(
        &self,
        release_id: Option<u64>,
    ) -> CatalogResult<ReleaseDetail> {
        let release_id = release_id.ok_or_else(|| log_failure(CatalogError::MissingReleaseId))?;
        info!("Querying Discogs release ID {}", release_id);

        let api = self.api.clone();
        let raw = tokio::task::spawn_blocking(move || api.release(release_id))
            .await
            .map_err(|e| ApiError::Worker(e.to_string()))
            .and_then(|result| result)
            .map_err(|e| log_failure(CatalogError::release(e)))?;

        Ok(normalize::release_detail(release_id, raw))
    }

    /// Fetch marketplace pricing for a release.
    pub async fn get_marketplace_stats(
        &self,
        release_id: Option<u64>,
        currency: &str,
    ) -> CatalogResult<MarketplaceStats> {
        let release_id = release_id.ok_or_else(|| log_failure(CatalogError::MissingReleaseId))?;
        info!(
            "Fetching marketplace stats for release ID {} ({})",
            release_id, currency
        );

        let body = self
            .api
            .marketplace_stats(release_id, currency)
            .await
            .map_err(|e| log_failure(CatalogError::marketplace(e)))?;

        Ok(normalize::marketplace_stats(release_id, &body))
    }
}

fn log_failure(err: CatalogError) -> CatalogError {
    if err.is_invalid_input() {
        info!("Rejected request: {}", err);
    } else {
        warn!("{}", err);
    }
    err
}
