//! Catalog records.
//!
//! Output records are what the tools hand back to the agent; every one of
//! them serializes to a plain JSON object. Raw types are the intermediate
//! shapes a [`DiscogsApi`](super::client::DiscogsApi) backend produces before
//! normalization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::{ApiError, ApiResult};

// ============================================================================
// Output Records
// ============================================================================

/// A single catalog search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub result_type: String,
    pub title: String,
    pub id: Option<u64>,
    /// Copied only when the raw item carries the key; a present `null` stays `null`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Value>,
}

/// Result of a catalog search, truncated to the first hits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    /// Always `results.len()`.
    pub count: usize,
    pub results: Vec<SearchResult>,
    /// Raw items dropped because they could not be normalized.
    pub skipped: usize,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, results: Vec<SearchResult>, skipped: usize) -> Self {
        Self {
            query: query.into(),
            count: results.len(),
            results,
            skipped,
        }
    }
}

/// An artist or label credit, reduced to name and id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    pub name: Option<String>,
    pub id: Option<u64>,
}

/// One tracklist entry. Missing sub-fields are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub position: Option<Value>,
    pub title: Option<Value>,
    pub duration: Option<Value>,
}

/// Detailed information about a single release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseDetail {
    pub id: u64,
    pub title: Option<String>,
    pub year: Option<Value>,
    pub country: Option<Value>,
    pub artists: Vec<EntityRef>,
    pub labels: Vec<EntityRef>,
    pub formats: Vec<Value>,
    pub genres: Vec<Value>,
    pub styles: Vec<Value>,
    pub tracklist: Vec<TrackInfo>,
    /// Tracklist entries dropped because they were not track-shaped.
    pub skipped_tracks: usize,
}

/// Pricing and availability for a release in one currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceStats {
    #[serde(rename = "releaseID")]
    pub release_id: u64,
    #[serde(rename = "lowestPrice")]
    pub lowest_price: Option<f64>,
    #[serde(rename = "activeListings")]
    pub active_listings: Option<u64>,
}

/// Uniform failure shape returned in place of any of the records above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

// ============================================================================
// Raw Backend Shapes
// ============================================================================

/// A typed track as produced by backends that decode eagerly.
///
/// Carried by [`RawTrack::Record`]; normalized the same way as a JSON map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub position: Option<String>,
    pub title: Option<String>,
    pub duration: Option<String>,
}

/// A tracklist entry before normalization.
///
/// [`DiscogsClient`](super::client::DiscogsClient) only yields `Map` and
/// `Unrecognized`. `Record` is for typed [`DiscogsApi`](super::client::DiscogsApi)
/// backends that decode tracks into [`TrackRecord`] before handing them over.
#[derive(Debug, Clone, PartialEq)]
pub enum RawTrack {
    /// Loosely-typed JSON object, straight off the wire.
    Map(Map<String, Value>),
    /// Typed record with named fields.
    Record(TrackRecord),
    /// Anything else. Never a track.
    Unrecognized(Value),
}

impl From<Value> for RawTrack {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::Map(map),
            other => Self::Unrecognized(other),
        }
    }
}

impl From<TrackRecord> for RawTrack {
    fn from(record: TrackRecord) -> Self {
        Self::Record(record)
    }
}

/// A release payload before normalization.
///
/// `fields` holds every top-level key of the release except `tracklist`,
/// which is split out into decoded [`RawTrack`] entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRelease {
    pub fields: Map<String, Value>,
    pub tracklist: Vec<RawTrack>,
}

impl RawRelease {
    /// Split a release JSON object into fields and tracklist.
    ///
    /// A missing or non-array `tracklist` yields an empty tracklist.
    pub fn from_value(value: Value) -> ApiResult<Self> {
        let Value::Object(mut fields) = value else {
            return Err(ApiError::UnexpectedShape("a release object"));
        };

        let tracklist = match fields.remove("tracklist") {
            Some(Value::Array(entries)) => entries.into_iter().map(RawTrack::from).collect(),
            _ => Vec::new(),
        };

        Ok(Self { fields, tracklist })
    }
}
