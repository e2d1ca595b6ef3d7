//! MCP tool implementations.
//!
//! This module contains all tools exposed by the rfcd server.

pub mod catalog;
pub mod document;

pub use catalog::{CatalogOutput, list_impl, refresh_impl};
pub use document::{RfcContentOutput, RfcDownloadOutput, RfcIdParams, download_impl, get_impl};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use rfcd_client::RfcService;
    use rfcd_client::testing::StaticSource;
    use rfcd_core::{AppConfig, CatalogDb};
    use rmcp::model::CallToolResult;

    const INDEX: &str = r#"<rfc-index>
        <rfc-entry><doc-id>RFC2616</doc-id><title>HTTP/1.1</title><current-status>DRAFT STANDARD</current-status></rfc-entry>
        <rfc-entry><doc-id>RFC7540</doc-id><title>HTTP/2</title><current-status>PROPOSED STANDARD</current-status></rfc-entry>
    </rfc-index>"#;

    pub(crate) async fn service_with(documents: &[(&str, &str)]) -> (tempfile::TempDir, Arc<StaticSource>, RfcService) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig { documents_dir: dir.path().join("rfcs"), ..Default::default() };
        let source = Arc::new(
            documents
                .iter()
                .fold(StaticSource::new(INDEX), |source, (id, body)| source.with_document(id, body)),
        );
        let catalog = CatalogDb::open_in_memory().await.unwrap();
        let service = RfcService::new(&config, catalog, source.clone());
        (dir, source, service)
    }

    pub(crate) fn text_of(result: &CallToolResult) -> String {
        let content_val = serde_json::to_value(&result.content[0]).unwrap();
        content_val
            .get("text")
            .and_then(|v| v.as_str())
            .expect("Expected text field in content")
            .to_string()
    }
}
