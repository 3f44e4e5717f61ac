//! Discogs tools module.
//!
//! This module provides the tools backed by the Discogs API:
//! - `search`: Free-text catalog search
//! - `release`: Release details and tracklist
//! - `marketplace`: Lowest price and listing count for a release
//!
//! Each tool has handlers for both HTTP and STDIO/TCP transports.

pub mod common;
pub mod marketplace;
pub mod release;
pub mod search;

pub use marketplace::{DiscogsMarketplaceParams, DiscogsMarketplaceTool};
pub use release::{DiscogsReleaseParams, DiscogsReleaseTool};
pub use search::{DiscogsSearchParams, DiscogsSearchTool};
