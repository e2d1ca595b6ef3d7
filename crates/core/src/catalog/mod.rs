//! SQLite-backed catalog of RFC metadata.
//!
//! This module provides the persistent mirror of the RFC index using SQLite
//! with async access via tokio-rusqlite. It supports:
//!
//! - Transactional full replace and bootstrap-if-empty reconciliation
//! - Possession tracking (`is_downloaded`) independent of catalog metadata
//! - Automatic schema migrations
//! - WAL mode for concurrent access

pub mod connection;
pub mod entry;
pub mod migrations;
pub mod store;

pub use crate::Error;

pub use connection::CatalogDb;
pub use entry::CatalogEntry;
