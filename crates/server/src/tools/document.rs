//! rfc_get and rfc_download tool implementations.

use rfcd_client::RfcService;
use rfcd_core::{Error, normalize};
use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for the rfc_get and rfc_download tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RfcIdParams {
    /// RFC identifier, e.g. "RFC2616", "rfc0091" or "7540".
    pub id: String,
}

/// Output from the rfc_get tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RfcContentOutput {
    /// Canonical identifier the content was resolved for.
    pub id: String,
    /// Document HTML.
    pub content: String,
}

/// Output from the rfc_download tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RfcDownloadOutput {
    pub message: String,
    pub rfc_id: String,
}

fn require_id(params: &RfcIdParams) -> Result<&str, Error> {
    let id = params.id.trim();
    if id.is_empty() {
        return Err(Error::InvalidInput("id cannot be empty".into()));
    }
    Ok(id)
}

/// Implementation of the rfc_get tool.
pub async fn get_impl(service: &RfcService, params: RfcIdParams) -> Result<CallToolResult, McpError> {
    let id = require_id(&params)?;
    let bytes = service.get_document_content(id).await?;

    let output = RfcContentOutput { id: normalize(id), content: String::from_utf8_lossy(&bytes).into_owned() };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize document: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Implementation of the rfc_download tool.
pub async fn download_impl(service: &RfcService, params: RfcIdParams) -> Result<CallToolResult, McpError> {
    let id = require_id(&params)?;
    service.materialize_document(id).await?;

    let output = RfcDownloadOutput { message: "RFC downloaded successfully".into(), rfc_id: normalize(id) };
    let json = serde_json::to_string_pretty(&output)
        .map_err(|e| Error::InvalidInput(format!("Failed to serialize output: {e}")))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}
