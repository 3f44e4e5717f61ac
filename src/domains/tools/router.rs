//! Tool Router - builds the rmcp ToolRouter from registry.
//!
//! This module builds the ToolRouter for STDIO/TCP transport by delegating
//! to the tool definitions themselves. Each tool knows how to create its own route.

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::catalog::CatalogService;

use super::definitions::{DiscogsMarketplaceTool, DiscogsReleaseTool, DiscogsSearchTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(service: CatalogService) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(DiscogsSearchTool::create_route(service.clone()))
        .with_route(DiscogsReleaseTool::create_route(service.clone()))
        .with_route(DiscogsMarketplaceTool::create_route(service))
}

#[cfg(test)]
mod tests {
    use super::super::registry::ToolRegistry;
    use super::*;
    use crate::domains::catalog::testing::MockApi;
    use std::sync::Arc;

    struct TestServer {}

    fn test_service() -> CatalogService {
        CatalogService::new(Arc::new(MockApi::default()))
    }

    #[test]
    fn test_build_router() {
        let router: ToolRouter<TestServer> = build_tool_router(test_service());
        let tools = router.list_all();
        assert_eq!(tools.len(), 3);

        let names: Vec<_> = tools.iter().map(|t| t.name.as_ref()).collect();
        assert!(names.contains(&"discogs_search"));
        assert!(names.contains(&"discogs_release_details"));
        assert!(names.contains(&"discogs_marketplace_stats"));
    }

    #[test]
    fn test_registry_matches_router() {
        // Ensure registry and router have the same tools
        let service = test_service();
        let registry = ToolRegistry::new(service.clone());
        let registry_names = registry.tool_names();

        let router: ToolRouter<TestServer> = build_tool_router(service);
        let router_tools = router.list_all();
        let router_names: Vec<_> = router_tools.iter().map(|t| t.name.as_ref()).collect();

        assert_eq!(registry_names.len(), router_names.len());
        for name in registry_names {
            assert!(router_names.contains(&name));
        }
    }
}
