//! Remote sources of index and document bytes.

use async_trait::async_trait;
use bytes::Bytes;
use rfcd_core::{AppConfig, Error};

use crate::fetch::{FetchClient, FetchConfig, RfcEndpoints};

/// Something that can produce the raw catalog index and raw RFC documents.
///
/// Both calls make exactly one attempt. Ids passed to
/// [`fetch_document`](RfcSource::fetch_document) are already canonical.
#[async_trait]
pub trait RfcSource: Send + Sync {
    /// Retrieve the full catalog index.
    async fn fetch_index(&self) -> Result<Bytes, Error>;

    /// Retrieve the HTML of a single RFC.
    async fn fetch_document(&self, id: &str) -> Result<Bytes, Error>;
}

/// [`RfcSource`] backed by HTTP(S) GETs against the RFC Editor site.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: FetchClient,
    endpoints: RfcEndpoints,
}

impl HttpSource {
    pub fn new(client: FetchClient, endpoints: RfcEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Build a client and endpoints from application configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, Error> {
        let client = FetchClient::new(FetchConfig::from(config))?;
        let endpoints = RfcEndpoints::new(&config.index_url, &config.document_base_url)
            .map_err(|e| Error::InvalidInput(format!("endpoint configuration: {e}")))?;
        Ok(Self::new(client, endpoints))
    }

    pub fn endpoints(&self) -> &RfcEndpoints {
        &self.endpoints
    }
}

#[async_trait]
impl RfcSource for HttpSource {
    async fn fetch_index(&self) -> Result<Bytes, Error> {
        let response = self.client.fetch(self.endpoints.index_url()).await?;
        tracing::info!(
            bytes = response.bytes.len(),
            fetch_ms = response.fetch_ms,
            content_type = response.content_type.as_deref().unwrap_or("-"),
            final_url = %response.final_url,
            "fetched rfc index"
        );
        Ok(response.bytes)
    }

    async fn fetch_document(&self, id: &str) -> Result<Bytes, Error> {
        let url = self
            .endpoints
            .document_url(id)
            .map_err(|e| Error::InvalidInput(format!("{id}: {e}")))?;
        let response = self.client.fetch(&url).await?;
        Ok(response.bytes)
    }
}
