//! Domains module containing business logic organized by bounded contexts.
//!
//! - **catalog**: Discogs API access and response normalization
//! - **tools**: MCP tools wrapping the catalog operations

pub mod catalog;
pub mod tools;
