//! Catalog domain module.
//!
//! Talks to the Discogs API and normalizes its heterogeneous responses into
//! stable records for the tools layer.
//!
//! ## Architecture
//!
//! - `client.rs` - `DiscogsApi` trait and the reqwest-backed `DiscogsClient`
//! - `normalize.rs` - Pure mapping from raw payloads to output records
//! - `service.rs` - The three catalog operations
//! - `model.rs` - Output records and raw backend shapes
//! - `error.rs` - Client and operation error types

pub mod client;
mod error;
pub mod model;
pub mod normalize;
mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{DiscogsApi, DiscogsClient};
pub use error::{ApiError, ApiResult, CatalogError, CatalogResult};
pub use model::{
    EntityRef, ErrorRecord, MarketplaceStats, RawRelease, RawTrack, ReleaseDetail,
    SearchResponse, SearchResult, TrackInfo, TrackRecord,
};
pub use service::{CatalogService, DEFAULT_CURRENCY};
