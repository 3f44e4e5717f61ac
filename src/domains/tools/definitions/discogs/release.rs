//! Discogs release details tool.
//!
//! Fetches a single release by its numeric Discogs id and returns title,
//! year, country, credits, formats, genres, styles and the tracklist.

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

/// Parameters for a release lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiscogsReleaseParams {
    /// Numeric Discogs release id.
    #[serde(default)]
    #[schemars(description = "Discogs release ID (numeric), e.g. from discogs_search results")]
    pub release_id: Option<u64>,
}

/// Discogs Release Details Tool implementation.
#[derive(Debug, Clone)]
pub struct DiscogsReleaseTool;

impl DiscogsReleaseTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "discogs_release_details";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get detailed information about a Discogs release by its ID: \
         title, year, country, artists, labels, formats, genres, styles and tracklist.";

    /// Execute the tool logic.
    pub async fn execute(params: &DiscogsReleaseParams, service: &CatalogService) -> CallToolResult {
        outcome_result(service.get_release_details(params.release_id).await)
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: &CatalogService,
    ) -> Result<serde_json::Value, ToolError> {
        let params: DiscogsReleaseParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        let result = Self::execute(&params, service).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DiscogsReleaseParams>(),
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
                let params: DiscogsReleaseParams = parse_params(args)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::RawRelease;
    use crate::domains::catalog::testing::{Canned, MockApi};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_release_params_null_and_missing() {
        let params: DiscogsReleaseParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.release_id, None);
        let params: DiscogsReleaseParams =
            serde_json::from_value(json!({"release_id": null})).unwrap();
        assert_eq!(params.release_id, None);
        let params: DiscogsReleaseParams =
            serde_json::from_value(json!({"release_id": 249504})).unwrap();
        assert_eq!(params.release_id, Some(249504));
    }

    #[tokio::test]
    async fn test_execute_without_id_is_error_record() {
        let api = Arc::new(MockApi::default());
        let service = CatalogService::new(api.clone());

        let params = DiscogsReleaseParams { release_id: None };
        let result = DiscogsReleaseTool::execute(&params, &service).await;

        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content,
            Some(json!({"error": "Release ID cannot be None"}))
        );
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_execute_returns_release_record() {
        let raw = RawRelease::from_value(json!({
            "id": 249504,
            "title": "Never Gonna Give You Up",
            "year": 1987,
            "country": "UK",
            "artists": [{"name": "Rick Astley", "id": 72872, "resource_url": "..."}],
            "labels": [{"name": "RCA", "id": 895, "catno": "PB 41447"}],
            "formats": [{"name": "Vinyl", "qty": "1", "descriptions": ["7\"", "Single", "45 RPM"]}],
            "genres": ["Electronic", "Pop"],
            "styles": ["Synth-pop"],
            "tracklist": [
                {"position": "A", "type_": "track", "title": "Never Gonna Give You Up", "duration": "3:32"},
                {"position": "B", "type_": "track", "title": "Never Gonna Give You Up (Instrumental)", "duration": "3:30"}
            ]
        }))
        .unwrap();
        let service = CatalogService::new(Arc::new(
            MockApi::default().with_release(Canned::Ok(raw)),
        ));

        let params = DiscogsReleaseParams {
            release_id: Some(249504),
        };
        let result = DiscogsReleaseTool::execute(&params, &service).await;
        assert_eq!(result.is_error, Some(false));

        let structured = result.structured_content.unwrap();
        assert_eq!(structured["artists"], json!([{"name": "Rick Astley", "id": 72872}]));
        assert_eq!(structured["labels"], json!([{"name": "RCA", "id": 895}]));
        assert_eq!(
            structured["tracklist"][0],
            json!({"position": "A", "title": "Never Gonna Give You Up", "duration": "3:32"})
        );
        assert_eq!(structured["skipped_tracks"], 0);
    }

    #[tokio::test]
    async fn test_execute_remote_failure_is_error_record() {
        let service = CatalogService::new(Arc::new(
            MockApi::default().with_release(Canned::Status(404, "Release not found.")),
        ));
        let params = DiscogsReleaseParams {
            release_id: Some(1),
        };
        let result = DiscogsReleaseTool::execute(&params, &service).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content.unwrap()["error"],
            "Error querying Discogs: HTTP error 404: Release not found."
        );
    }
}
