//! Core types and shared functionality for rfcd.
//!
//! This crate provides:
//! - Catalog store with SQLite backend
//! - RFC index decoding and identifier normalization
//! - Unified error types
//! - Configuration structures

pub mod catalog;
pub mod config;
pub mod error;
pub mod id;
pub mod index;

pub use catalog::{CatalogDb, CatalogEntry};
pub use config::AppConfig;
pub use error::Error;
pub use id::normalize;
pub use index::parse_index;
