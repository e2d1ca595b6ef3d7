//! Catalog entry model and its row encoding.

use serde::{Deserialize, Serialize};
use tokio_rusqlite::rusqlite::{self, Row};

/// Separator used when flattening list fields into a single column.
pub const LIST_SEPARATOR: &str = ", ";

/// Metadata for one RFC as mirrored from the remote index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct CatalogEntry {
    /// Canonical identifier, e.g. `rfc2616`.
    pub id: String,
    pub title: String,
    pub authors: Vec<String>,
    pub year: String,
    pub month: String,
    pub obsoletes: Vec<String>,
    pub obsoleted_by: Vec<String>,
    pub updates: Vec<String>,
    pub updated_by: Vec<String>,
    /// Upstream lifecycle status, passed through verbatim.
    pub status: String,
    pub is_downloaded: bool,

    /// Set by the store at write time; empty until persisted.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Column list shared by every SELECT that decodes into [`CatalogEntry`].
pub(crate) const SELECT_COLUMNS: &str = "id, title, authors, year, month, obsoletes, obsoleted_by, \
     updates, updated_by, status, is_downloaded, created_at, updated_at";

impl CatalogEntry {
    /// Decode a row selected with [`SELECT_COLUMNS`].
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            authors: split_list(row.get::<_, Option<String>>(2)?.as_deref()),
            year: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            month: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
            obsoletes: split_list(row.get::<_, Option<String>>(5)?.as_deref()),
            obsoleted_by: split_list(row.get::<_, Option<String>>(6)?.as_deref()),
            updates: split_list(row.get::<_, Option<String>>(7)?.as_deref()),
            updated_by: split_list(row.get::<_, Option<String>>(8)?.as_deref()),
            status: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            is_downloaded: row.get::<_, i32>(10)? == 1,
            created_at: row.get::<_, Option<String>>(11)?.unwrap_or_default(),
            updated_at: row.get::<_, Option<String>>(12)?.unwrap_or_default(),
        })
    }
}

/// Flatten a list field for storage. Empty lists become `""`.
pub fn join_list(items: &[String]) -> String {
    items.join(LIST_SEPARATOR)
}

/// Inverse of [`join_list`]. `NULL` and `""` both decode to an empty list.
pub fn split_list(stored: Option<&str>) -> Vec<String> {
    match stored {
        None | Some("") => Vec::new(),
        Some(s) => s.split(LIST_SEPARATOR).map(str::to_string).collect(),
    }
}
