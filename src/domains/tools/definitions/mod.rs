//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod discogs;

pub use discogs::{
    DiscogsMarketplaceParams, DiscogsMarketplaceTool, DiscogsReleaseParams, DiscogsReleaseTool,
    DiscogsSearchParams, DiscogsSearchTool,
};
