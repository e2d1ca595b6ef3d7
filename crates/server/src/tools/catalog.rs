//! rfc_list and rfc_refresh tool implementations.
//!
//! Both return the whole catalog; rfc_list bootstraps it from the remote
//! index only when it is empty, rfc_refresh always replaces it.

use rfcd_client::RfcService;
use rfcd_core::{CatalogEntry, Error};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Output from the rfc_list and rfc_refresh tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CatalogOutput {
    /// Number of entries returned.
    pub count: usize,
    /// When the catalog was last populated from the remote index.
    pub last_synced_at: Option<String>,
    /// Catalog entries, in no particular order.
    pub entries: Vec<CatalogEntry>,
}

async fn render(service: &RfcService, entries: Vec<CatalogEntry>) -> Result<CallToolResult, McpError> {
    let output = CatalogOutput {
        count: entries.len(),
        last_synced_at: service.catalog().last_synced_at().await?,
        entries,
    };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize catalog: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Implementation of the rfc_list tool.
pub async fn list_impl(service: &RfcService) -> Result<CallToolResult, McpError> {
    let entries = service.list_catalog().await?;
    render(service, entries).await
}

/// Implementation of the rfc_refresh tool.
pub async fn refresh_impl(service: &RfcService) -> Result<CallToolResult, McpError> {
    let entries = service.refresh_catalog().await?;
    tracing::info!(entries = entries.len(), "catalog refreshed");
    render(service, entries).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::test_support::{service_with, text_of};

    #[tokio::test]
    async fn test_list_impl_bootstraps() {
        let (_dir, source, service) = service_with(&[]).await;

        let result = list_impl(&service).await.unwrap();
        let output: CatalogOutput = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(output.count, 2);
        assert!(output.last_synced_at.is_some());
        assert_eq!(source.index_fetches(), 1);
    }

    #[tokio::test]
    async fn test_refresh_impl_refetches() {
        let (_dir, source, service) = service_with(&[]).await;

        list_impl(&service).await.unwrap();
        let result = refresh_impl(&service).await.unwrap();
        let output: CatalogOutput = serde_json::from_str(&text_of(&result)).unwrap();
        assert_eq!(output.count, 2);
        assert_eq!(source.index_fetches(), 2);
    }
}
