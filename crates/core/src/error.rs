//! Unified error types for rfcd.
//!
//! Every component surfaces one of these variants unchanged to its caller, so
//! the outward layer can map them uniformly to a response.

use std::path::PathBuf;

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the rfcd catalog and document cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty RFC identifier).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Remote retrieval failed: network, DNS, non-2xx status or oversized body.
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// The index payload was not well-formed.
    #[error("DECODE_ERROR: {0}")]
    Decode(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("STORE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Local document cache read or write failed.
    #[error("FILESYSTEM_ERROR: {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Filesystem { path: path.into(), source }
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<quick_xml::DeError> for Error {
    fn from(err: quick_xml::DeError) -> Self {
        Error::Decode(err.to_string())
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match &err {
            Error::InvalidInput(_) => -32602,
            Error::Transport(_) => -32020,
            Error::Decode(_) => -32021,
            Error::Database(_) | Error::MigrationFailed(_) => -32022,
            Error::Filesystem { .. } => -32023,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}
