//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating tool calls to the Discogs tools.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool.
//! Each tool defines:
//! - Parameters struct (for rmcp)
//! - `execute()` method (core logic)
//! - `http_handler()` method (called via ToolRegistry for HTTP transport)
//!
//! The ToolRouter is built dynamically in `domains/tools/router.rs`.
//! **Adding a new tool does NOT require modifying this file!**

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::{info, warn};

use super::config::Config;
use super::error::{self, Error};
use crate::domains::{
    catalog::{CatalogService, DiscogsClient},
    tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

const INSTRUCTIONS: &str = "Discogs music database assistant. Use discogs_search to find artists, \
     releases and labels, discogs_release_details to read a release's credits and tracklist, and \
     discogs_marketplace_stats to find the lowest marketplace price for a release.";

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and routes
/// tool calls to the catalog service.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service running the catalog operations.
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    catalog: CatalogService,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server over an existing catalog service.
    pub fn new(config: Config, catalog: CatalogService) -> Self {
        Self {
            tool_router: build_tool_router::<Self>(catalog.clone()),
            config: Arc::new(config),
            catalog,
        }
    }

    /// Create a server talking to the real Discogs API.
    ///
    /// The API client is built once here and shared by every tool call for
    /// the lifetime of the server.
    pub async fn from_config(config: Config) -> error::Result<Self> {
        if config.discogs.base_url.trim().is_empty() {
            return Err(Error::config("Discogs base URL must not be empty"));
        }

        let client = DiscogsClient::connect(config.discogs.clone()).await?;
        if client.is_authenticated() {
            info!("Discogs client ready ({}, authenticated)", config.discogs.base_url);
        } else {
            warn!(
                "No Discogs token configured - requests are unauthenticated and rate limited. \
                 Set MCP_DISCOGS_TOKEN (generate one at https://www.discogs.com/settings/developers)"
            );
            info!("Discogs client ready ({}, unauthenticated)", config.discogs.base_url);
        }

        Ok(Self::new(config, CatalogService::new(Arc::new(client))))
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Server instructions shown to clients on initialization.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Names of the registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    ///
    /// This method uses the ToolRegistry to dispatch to the appropriate
    /// tool handler. Each tool's http_handler is defined in its own file
    /// under `domains/tools/definitions/`.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let registry = ToolRegistry::new(self.catalog.clone());
        registry.call_tool(name, arguments).await
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
