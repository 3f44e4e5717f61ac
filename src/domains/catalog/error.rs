//! Catalog-specific error types.
//!
//! Two layers: [`ApiError`] describes what went wrong talking to Discogs,
//! [`CatalogError`] is what a catalog operation reports to its caller. The
//! `Display` text of a `CatalogError` is exactly the message placed in the
//! returned [`ErrorRecord`].

use thiserror::Error;

use super::model::ErrorRecord;

/// Result type for Discogs API client calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors raised by a [`DiscogsApi`](super::client::DiscogsApi) backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status code.
    #[error("HTTP error {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body was not valid JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The response was JSON but not the shape we expected at the top level.
    #[error("unexpected response shape: expected {0}")]
    UnexpectedShape(&'static str),

    /// Query string encoding failed.
    #[error("{0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// The blocking worker running the request died.
    #[error("background worker failed: {0}")]
    Worker(String),
}

impl ApiError {
    /// Create a status error from a code and response body.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::Status {
            status,
            body: body.into(),
        }
    }
}

/// Errors reported by the catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A release id was required but not supplied. No remote call is made.
    #[error("Release ID cannot be None")]
    MissingReleaseId,

    /// The catalog search call failed.
    #[error("Error searching Discogs: {0}")]
    Search(String),

    /// The release fetch failed.
    #[error("Error querying Discogs: {0}")]
    Release(String),

    /// The marketplace endpoint answered with a non-success status.
    #[error("HTTP error {status}: {body}")]
    MarketplaceStatus { status: u16, body: String },

    /// Any other marketplace failure: network, timeout, malformed JSON.
    #[error("Error fetching marketplace stats: {0}")]
    Marketplace(String),
}

impl CatalogError {
    /// Whether the error was caught before any remote call was attempted.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::MissingReleaseId)
    }

    /// Convert into the uniform failure record returned to tool callers.
    pub fn to_record(&self) -> ErrorRecord {
        ErrorRecord::new(self.to_string())
    }

    pub(crate) fn search(err: ApiError) -> Self {
        Self::Search(with_causes(&err))
    }

    pub(crate) fn release(err: ApiError) -> Self {
        Self::Release(with_causes(&err))
    }

    pub(crate) fn marketplace(err: ApiError) -> Self {
        match err {
            ApiError::Status { status, body } => Self::MarketplaceStatus { status, body },
            other => Self::Marketplace(with_causes(&other)),
        }
    }
}

/// Render an error followed by each cause in its source chain.
///
/// reqwest keeps the useful part ("operation timed out", "connection
/// refused") in the sources, not in its own message. Causes already
/// contained in the text so far are not repeated.
fn with_causes(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
