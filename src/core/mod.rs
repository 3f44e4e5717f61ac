//! Core module containing shared infrastructure components.
//!
//! Configuration, error handling, the MCP server handler and the transports
//! it can be served over.

pub mod config;
pub mod error;
pub mod server;
pub mod transport;

pub use config::{Config, DiscogsConfig};
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
