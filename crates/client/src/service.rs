//! The operations exposed to the request layer.

use std::sync::Arc;

use bytes::Bytes;
use rfcd_core::{AppConfig, CatalogDb, CatalogEntry, Error};

use crate::{DocumentCache, HttpSource, RfcSource, SyncOrchestrator};

/// Catalog mirror and document cache behind one handle.
///
/// Cheap to clone; clones share the database connection and HTTP client.
#[derive(Clone)]
pub struct RfcService {
    sync: SyncOrchestrator,
    documents: DocumentCache,
    catalog: CatalogDb,
}

impl RfcService {
    pub fn new(config: &AppConfig, catalog: CatalogDb, source: Arc<dyn RfcSource>) -> Self {
        Self {
            sync: SyncOrchestrator::new(source.clone(), catalog.clone()),
            documents: DocumentCache::new(config.documents_dir.clone(), source, catalog.clone()),
            catalog,
        }
    }

    /// Open the catalog at `config.db_path` and fetch over HTTP.
    pub async fn open(config: &AppConfig) -> Result<Self, Error> {
        let catalog = CatalogDb::open(&config.db_path).await?;
        let source = Arc::new(HttpSource::from_config(config)?);
        Ok(Self::new(config, catalog, source))
    }

    /// All catalog entries, bootstrapping the catalog first if it is empty.
    pub async fn list_catalog(&self) -> Result<Vec<CatalogEntry>, Error> {
        self.sync.lazy_sync().await
    }

    /// Replace the catalog from the remote index and return the result.
    pub async fn refresh_catalog(&self) -> Result<Vec<CatalogEntry>, Error> {
        self.sync.full_sync().await
    }

    /// Document content for `id`, from the local cache when present.
    pub async fn get_document_content(&self, id: &str) -> Result<Bytes, Error> {
        self.documents.resolve(id).await
    }

    /// Download `id`, keep it in the local cache and flag it downloaded.
    pub async fn materialize_document(&self, id: &str) -> Result<(), Error> {
        self.documents.fetch_and_persist(id).await
    }

    pub fn catalog(&self) -> &CatalogDb {
        &self.catalog
    }
}
