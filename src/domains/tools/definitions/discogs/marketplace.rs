//! Discogs marketplace stats tool.
//!
//! Looks up the lowest current price and the number of copies for sale for a
//! release, in a chosen currency.

use futures::FutureExt;
use rmcp::{
    handler::server::tool::{ToolCallContext, ToolRoute, cached_schema_for_type},
    model::{CallToolResult, Tool},
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::common::{outcome_result, parse_params};
use crate::domains::catalog::{CatalogService, DEFAULT_CURRENCY};

#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

/// Parameters for a marketplace stats lookup.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DiscogsMarketplaceParams {
    /// Numeric Discogs release id.
    #[serde(default)]
    #[schemars(description = "Discogs release ID (numeric) whose marketplace stats are wanted")]
    pub release_id: Option<u64>,

    /// Currency code for prices.
    #[serde(default = "default_currency", alias = "curr_abbr")]
    #[schemars(
        description = "Currency for prices: USD, GBP, EUR, CAD, AUD, JPY, CHF, MXN, BRL, NZD, SEK or ZAR (default: USD)"
    )]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Discogs Marketplace Stats Tool implementation.
#[derive(Debug, Clone)]
pub struct DiscogsMarketplaceTool;

impl DiscogsMarketplaceTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "discogs_marketplace_stats";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get Discogs marketplace statistics for a release: \
         the lowest listed price in the requested currency and the number of copies currently for sale.";

    /// Execute the tool logic.
    pub async fn execute(
        params: &DiscogsMarketplaceParams,
        service: &CatalogService,
    ) -> CallToolResult {
        outcome_result(
            service
                .get_marketplace_stats(params.release_id, &params.currency)
                .await,
        )
    }

    /// HTTP handler for this tool (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn http_handler(
        arguments: serde_json::Value,
        service: &CatalogService,
    ) -> Result<serde_json::Value, ToolError> {
        let params: DiscogsMarketplaceParams = serde_json::from_value(arguments)
            .map_err(|e| ToolError::invalid_arguments(e.to_string()))?;
        let result = Self::execute(&params, service).await;
        Ok(super::common::http_response(result))
    }

    /// Create a Tool model for this tool (metadata).
    pub fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<DiscogsMarketplaceParams>(),
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
                let params: DiscogsMarketplaceParams = parse_params(args)?;
                Ok(Self::execute(&params, &service).await)
            }
            .boxed()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::testing::{Canned, MockApi};
    use serde_json::json;
    use std::sync::Arc;

    #[test]
    fn test_marketplace_params_default_currency() {
        let params: DiscogsMarketplaceParams =
            serde_json::from_value(json!({"release_id": 249504})).unwrap();
        assert_eq!(params.currency, "USD");
    }

    #[test]
    fn test_marketplace_params_curr_abbr_alias() {
        let params: DiscogsMarketplaceParams =
            serde_json::from_value(json!({"release_id": 249504, "curr_abbr": "EUR"})).unwrap();
        assert_eq!(params.currency, "EUR");
    }

    #[test]
    fn test_execute_without_release_id() {
        let api = Arc::new(MockApi::default());
        let service = CatalogService::new(api.clone());
        let params = DiscogsMarketplaceParams {
            release_id: None,
            currency: "USD".to_string(),
        };

        let result = tokio_test::block_on(DiscogsMarketplaceTool::execute(&params, &service));
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content,
            Some(json!({"error": "Release ID cannot be None"}))
        );
        assert_eq!(api.calls(), 0);
    }

    #[tokio::test]
    async fn test_execute_returns_stats_record() {
        let api = Arc::new(MockApi::default().with_marketplace(Canned::Ok(json!({
            "lowest_price": {"value": 12.5, "currency": "USD"},
            "num_for_sale": 3
        }))));
        let service = CatalogService::new(api.clone());
        let params: DiscogsMarketplaceParams =
            serde_json::from_value(json!({"release_id": 249504})).unwrap();

        let result = DiscogsMarketplaceTool::execute(&params, &service).await;
        assert_eq!(result.is_error, Some(false));
        assert_eq!(
            result.structured_content,
            Some(json!({"releaseID": 249504, "lowestPrice": 12.5, "activeListings": 3}))
        );
        assert_eq!(api.last_currency().as_deref(), Some("USD"));
    }

    #[tokio::test]
    async fn test_execute_http_404_does_not_fail_the_call() {
        let service = CatalogService::new(Arc::new(
            MockApi::default().with_marketplace(Canned::Status(404, "Not found")),
        ));
        let params = DiscogsMarketplaceParams {
            release_id: Some(1),
            currency: "USD".to_string(),
        };

        let result = DiscogsMarketplaceTool::execute(&params, &service).await;
        assert_eq!(result.is_error, Some(true));
        assert_eq!(
            result.structured_content.unwrap()["error"],
            "HTTP error 404: Not found"
        );
    }
}
