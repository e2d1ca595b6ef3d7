//! MCP server handler implementation.
//!
//! This module defines the main server handler that
//! routes tool calls to the appropriate implementations.
use crate::tools::{RfcIdParams, download_impl, get_impl, list_impl, refresh_impl};

use rfcd_client::RfcService;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{
        tool::{ToolCallContext, ToolRouter},
        wrapper::Parameters,
    },
    model::{
        CallToolRequestParam, CallToolResult, Implementation, ListToolsResult, PaginatedRequestParam, ProtocolVersion,
        ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
};

/// The main MCP server handler for rfcd.
#[derive(Clone)]
pub struct RfcServer {
    service: RfcService,
    tool_router: ToolRouter<Self>,
}

/// Tool router implementation using the #[tool_router] macro.
///
/// This macro generates the routing logic that maps tool names to handler methods.
#[tool_router]
impl RfcServer {
    /// Create a new server handler.
    pub fn new(service: RfcService) -> Self {
        Self { service, tool_router: Self::tool_router() }
    }

    /// List the local RFC catalog.
    ///
    /// Downloads and stores the RFC index first if the catalog is empty.
    #[tool(description = "List all RFCs in the local catalog. Populates the catalog from rfc-editor.org if it is empty.")]
    async fn rfc_list(&self) -> Result<CallToolResult, McpError> {
        list_impl(&self.service).await
    }

    /// Replace the local catalog from the remote RFC index.
    #[tool(description = "Re-download the RFC index and replace the local catalog. Returns the refreshed catalog.")]
    async fn rfc_refresh(&self) -> Result<CallToolResult, McpError> {
        refresh_impl(&self.service).await
    }

    /// Get the HTML content of one RFC.
    #[tool(description = "Get the HTML of an RFC by id (e.g. RFC2616). Served from the local cache when downloaded.")]
    async fn rfc_get(&self, params: Parameters<RfcIdParams>) -> Result<CallToolResult, McpError> {
        get_impl(&self.service, params.0).await
    }

    /// Download one RFC into the local cache.
    #[tool(description = "Download an RFC into the local document cache and mark it as downloaded in the catalog.")]
    async fn rfc_download(&self, params: Parameters<RfcIdParams>) -> Result<CallToolResult, McpError> {
        download_impl(&self.service, params.0).await
    }
}

impl ServerHandler for RfcServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: "rfcd".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self, _request: Option<PaginatedRequestParam>, _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, rmcp::model::ErrorData> {
        Ok(ListToolsResult { meta: None, tools: self.tool_router.list_all(), next_cursor: None })
    }

    async fn call_tool(
        &self, request: CallToolRequestParam, context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, rmcp::model::ErrorData> {
        self.tool_router
            .call(ToolCallContext::new(self, request, context))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::service_with;

    #[tokio::test]
    async fn test_tools_registered() {
        let (_dir, _source, service) = service_with(&[]).await;
        let server = RfcServer::new(service);

        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(names, vec!["rfc_download", "rfc_get", "rfc_list", "rfc_refresh"]);
    }

    #[tokio::test]
    async fn test_server_info() {
        let (_dir, _source, service) = service_with(&[]).await;
        let info = RfcServer::new(service).get_info();
        assert_eq!(info.server_info.name, "rfcd");
    }
}
