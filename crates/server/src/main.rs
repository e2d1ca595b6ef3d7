//! rfcd server entry point.
//!
//! Boots the MCP server on stdio transport. Logging goes to stderr to avoid
//! interfering with the JSON-RPC protocol on stdout.

use anyhow::{Context, Result};
use rfcd_client::RfcService;
use rfcd_core::AppConfig;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    tracing::info!(
        db_path = %config.db_path.display(),
        documents_dir = %config.documents_dir.display(),
        index_url = %config.index_url,
        "Starting rfcd server on stdio transport"
    );

    let service = RfcService::open(&config).await.context("opening rfc catalog")?;

    let handler = handler::RfcServer::new(service);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
