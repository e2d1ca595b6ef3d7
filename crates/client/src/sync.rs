//! Catalog refresh: fetch the index, parse it, reconcile the store.

use std::sync::Arc;

use rfcd_core::{CatalogDb, CatalogEntry, Error, parse_index};

use crate::RfcSource;

/// Drives the fetch → parse → store pipeline.
#[derive(Clone)]
pub struct SyncOrchestrator {
    source: Arc<dyn RfcSource>,
    catalog: CatalogDb,
}

impl SyncOrchestrator {
    pub fn new(source: Arc<dyn RfcSource>, catalog: CatalogDb) -> Self {
        Self { source, catalog }
    }

    /// Replace the catalog with a freshly fetched index and return its contents.
    pub async fn full_sync(&self) -> Result<Vec<CatalogEntry>, Error> {
        let entries = self.fetch_entries().await?;
        self.catalog.replace_all(&entries).await?;
        self.catalog.list_all().await
    }

    /// Populate the catalog only if it is empty, then return its contents.
    ///
    /// Performs no remote fetch when the catalog already has entries.
    pub async fn lazy_sync(&self) -> Result<Vec<CatalogEntry>, Error> {
        if self.catalog.count().await? == 0 {
            let entries = self.fetch_entries().await?;
            if !self.catalog.upsert_if_empty(&entries).await? {
                tracing::debug!("catalog populated concurrently, fetched index discarded");
            }
        }
        self.catalog.list_all().await
    }

    async fn fetch_entries(&self) -> Result<Vec<CatalogEntry>, Error> {
        let bytes = self.source.fetch_index().await?;
        parse_index(&bytes)
    }
}
