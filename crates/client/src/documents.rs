//! Local-disk cache of RFC documents in front of remote retrieval.
//!
//! Each document lives at `<root>/<canonical id>.html`. Disk presence decides
//! whether a read goes to the network; the catalog's `is_downloaded` flag is
//! only updated by [`DocumentCache::fetch_and_persist`] and is never consulted
//! on reads. Files are never evicted.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use rfcd_core::{CatalogDb, Error, id};

use crate::RfcSource;

static TMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Canonicalize `raw` and make sure it is usable as a file name and URL segment.
fn cache_key(raw: &str) -> Result<String, Error> {
    let key = id::normalize(raw);
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '_' | '.'));

    if valid { Ok(key) } else { Err(Error::InvalidInput(format!("unusable RFC identifier: {raw:?}"))) }
}

/// Resolves RFC ids to document bytes.
#[derive(Clone)]
pub struct DocumentCache {
    root: PathBuf,
    source: Arc<dyn RfcSource>,
    catalog: CatalogDb,
}

impl DocumentCache {
    pub fn new(root: impl Into<PathBuf>, source: Arc<dyn RfcSource>, catalog: CatalogDb) -> Self {
        Self { root: root.into(), source, catalog }
    }

    /// Directory holding the cached documents.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path the document for `id` is (or would be) stored at.
    pub fn path_for(&self, id: &str) -> Result<PathBuf, Error> {
        Ok(self.root.join(format!("{}.html", cache_key(id)?)))
    }

    /// Whether the document for `id` is present on disk.
    pub async fn is_cached(&self, id: &str) -> Result<bool, Error> {
        let path = self.path_for(id)?;
        tokio::fs::try_exists(&path)
            .await
            .map_err(|e| Error::filesystem(&path, e))
    }

    /// Return the document for `id`, from disk if present, otherwise remotely.
    ///
    /// A remote fetch is not written to disk.
    pub async fn resolve(&self, id: &str) -> Result<Bytes, Error> {
        let key = cache_key(id)?;
        let path = self.root.join(format!("{key}.html"));

        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                tracing::debug!(id = %key, bytes = bytes.len(), "document cache hit");
                return Ok(Bytes::from(bytes));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => return Err(Error::filesystem(&path, e)),
        }

        tracing::debug!(id = %key, "document cache miss, fetching");
        self.source.fetch_document(&key).await
    }

    /// Fetch `id` remotely, store it on disk and flag it downloaded.
    ///
    /// Always fetches, even when a cached copy exists. The bytes are written
    /// to a unique temporary file and renamed into place, so concurrent calls
    /// for the same id leave one complete file behind.
    pub async fn fetch_and_persist(&self, id: &str) -> Result<(), Error> {
        let key = cache_key(id)?;
        let bytes = self.source.fetch_document(&key).await?;

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| Error::filesystem(&self.root, e))?;

        let path = self.root.join(format!("{key}.html"));
        let tmp = self.root.join(format!(
            ".{key}.html.{}.{}.tmp",
            std::process::id(),
            TMP_SEQ.fetch_add(1, Ordering::Relaxed)
        ));

        write_atomically(&tmp, &path, &bytes).await?;

        self.catalog.mark_downloaded(&key).await?;

        tracing::info!(id = %key, bytes = bytes.len(), path = %path.display(), "document materialized");
        Ok(())
    }
}

/// Write `bytes` to `tmp` and rename it over `path`.
///
/// `tmp` is removed on any failure, including a write that stopped partway.
async fn write_atomically(tmp: &Path, path: &Path, bytes: &[u8]) -> Result<(), Error> {
    if let Err(e) = tokio::fs::write(tmp, bytes).await {
        remove_temporary(tmp).await;
        return Err(Error::filesystem(tmp, e));
    }
    if let Err(e) = tokio::fs::rename(tmp, path).await {
        remove_temporary(tmp).await;
        return Err(Error::filesystem(path, e));
    }
    Ok(())
}

async fn remove_temporary(tmp: &Path) {
    match tokio::fs::remove_file(tmp).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %tmp.display(), error = %e, "failed to remove temporary file"),
    }
}
