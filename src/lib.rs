//! Discogs MCP Server Library
//!
//! Exposes the Discogs music database to MCP clients through three tools:
//! catalog search, release details and marketplace statistics.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**
//!   - **catalog**: the Discogs client, response normalization and the service
//!     running each operation
//!   - **tools**: MCP tool definitions wrapping the catalog service
//!
//! # Example
//!
//! ```rust,no_run
//! use discogs_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::from_config(config.clone()).await?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};
pub use domains::catalog::{CatalogService, DiscogsClient};
