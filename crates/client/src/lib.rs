//! Client code for rfcd.
//!
//! This crate provides the HTTP fetch pipeline, the document cache, the
//! catalog sync pipeline and the [`RfcService`] facade used by the server.

pub mod documents;
pub mod fetch;
pub mod service;
pub mod source;
pub mod sync;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use documents::DocumentCache;
pub use fetch::{FetchClient, FetchConfig, FetchResponse, RfcEndpoints};
pub use service::RfcService;
pub use source::{HttpSource, RfcSource};
pub use sync::SyncOrchestrator;
