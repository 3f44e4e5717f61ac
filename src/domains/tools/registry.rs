//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - HTTP dispatch for tool calls (when http feature is enabled)
//! - Tool metadata for listing

use rmcp::model::Tool;

use crate::domains::catalog::CatalogService;

use super::definitions::{DiscogsMarketplaceTool, DiscogsReleaseTool, DiscogsSearchTool};

#[cfg(feature = "http")]
use super::ToolError;
#[cfg(feature = "http")]
use tracing::warn;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - manages all available tools.
///
/// This struct provides a central point for:
/// - Listing all available tools
/// - Dispatching HTTP tool calls (when http feature is enabled)
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    service: CatalogService,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            DiscogsSearchTool::NAME,
            DiscogsReleaseTool::NAME,
            DiscogsMarketplaceTool::NAME,
        ]
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools() -> Vec<Tool> {
        vec![
            DiscogsSearchTool::to_tool(),
            DiscogsReleaseTool::to_tool(),
            DiscogsMarketplaceTool::to_tool(),
        ]
    }

    /// Dispatch an HTTP tool call to the appropriate handler.
    ///
    /// This is used by the HTTP transport to call tools.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        match name {
            DiscogsSearchTool::NAME => DiscogsSearchTool::http_handler(arguments, &self.service).await,
            DiscogsReleaseTool::NAME => {
                DiscogsReleaseTool::http_handler(arguments, &self.service).await
            }
            DiscogsMarketplaceTool::NAME => {
                DiscogsMarketplaceTool::http_handler(arguments, &self.service).await
            }
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
