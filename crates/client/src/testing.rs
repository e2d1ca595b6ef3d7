//! In-memory [`RfcSource`] for tests.
//!
//! Compiled for this crate's own tests and, with the `testing` feature, for
//! downstream crates.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use rfcd_core::Error;

use crate::RfcSource;

/// Three-entry index: rfc100, rfc200 (obsoletes rfc100 and rfc101) and rfc9999.
pub const INDEX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rfc-index xmlns="http://www.rfc-editor.org/rfc-index">
    <rfc-entry>
        <doc-id>RFC0100</doc-id>
        <title>Proposed Standard</title>
        <author><name>P. Karp</name></author>
        <date><month>February</month><year>1971</year></date>
        <obsoleted-by><doc-id>RFC0200</doc-id></obsoleted-by>
        <current-status>UNKNOWN</current-status>
    </rfc-entry>
    <rfc-entry>
        <doc-id>RFC0200</doc-id>
        <title>Successor</title>
        <author><name>J. Postel</name></author>
        <date><month>August</month><year>1971</year></date>
        <obsoletes><doc-id>rfc100</doc-id><doc-id>rfc101</doc-id></obsoletes>
        <current-status>HISTORIC</current-status>
    </rfc-entry>
    <rfc-entry>
        <doc-id>RFC9999</doc-id>
        <title>Placeholder</title>
        <current-status>INFORMATIONAL</current-status>
    </rfc-entry>
</rfc-index>"#;

/// Serves a fixed index and per-id documents, counting every call.
pub struct StaticSource {
    index: Mutex<Bytes>,
    documents: HashMap<String, Bytes>,
    index_fetches: AtomicUsize,
    document_fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new(index: &str) -> Self {
        Self {
            index: Mutex::new(Bytes::from(index.to_string())),
            documents: HashMap::new(),
            index_fetches: AtomicUsize::new(0),
            document_fetches: AtomicUsize::new(0),
        }
    }

    /// Serve `body` for the canonical id `id`. Unknown ids answer with a 404 transport error.
    pub fn with_document(mut self, id: &str, body: &str) -> Self {
        self.documents.insert(id.to_string(), Bytes::from(body.to_string()));
        self
    }

    pub fn set_index(&self, index: &str) {
        *self.index.lock().unwrap_or_else(PoisonError::into_inner) = Bytes::from(index.to_string());
    }

    pub fn index_fetches(&self) -> usize {
        self.index_fetches.load(Ordering::SeqCst)
    }

    pub fn document_fetches(&self) -> usize {
        self.document_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RfcSource for StaticSource {
    async fn fetch_index(&self) -> Result<Bytes, Error> {
        self.index_fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.index.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    async fn fetch_document(&self, id: &str) -> Result<Bytes, Error> {
        self.document_fetches.fetch_add(1, Ordering::SeqCst);
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| Error::Transport(format!("GET {id}.html: status 404")))
    }
}
