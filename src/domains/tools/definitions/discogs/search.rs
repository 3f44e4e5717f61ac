//! Discogs catalog search tool.
//!
//! Searches the Discogs database for artists, releases, masters and labels
//! matching a free-text query and returns the first ten hits.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{outcome_result, parse_params};
use crate::domains::catalog::CatalogService;

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for catalog search.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiscogsSearchParams {
    /// Free-text search query.
    #[schemars(description = "Search query, e.g. an artist, album title, label or catalog number")]
    pub query: String,
}

/// Discogs Catalog Search Tool implementation.
#[derive(Debug, Clone)]
pub struct DiscogsSearchTool;

impl DiscogsSearchTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "discogs_search";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Search the Discogs database for artists, releases and labels. \
         Returns up to 10 results with type, title, id and, when known, year, country and format. \
         Use a release id from the results with discogs_release_details or discogs_marketplace_stats.";

    /// Execute the tool logic.
    pub async fn execute(params: &DiscogsSearchParams, service: &CatalogService) -> CallToolResult {
        outcome_result(service.search_catalog(&params.query).await)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: &CatalogService,
    ) -> Result<serde_json::Value, ToolError> {
        let params: DiscogsSearchParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        let result = Self::execute(&params, service).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DiscogsSearchParams>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    /// Create a ToolRoute for STDIO/TCP transport.
    pub fn create_route<S>(service: CatalogService) -> ToolRoute<S>
    where
        S: Send + Sync + 'static,
    {
        ToolRoute::new_dyn(Self::to_tool(), move |ctx: ToolCallContext<'_, S>| {
            let args = ctx.arguments.clone().unwrap_or_default();
            let service = service.clone();
            async move {
                let params: DiscogsSearchParams = parse_params(args)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}
