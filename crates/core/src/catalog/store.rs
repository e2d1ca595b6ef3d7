//! Catalog reconciliation and query operations.
//!
//! Full replaces and bootstrap inserts each run inside a single IMMEDIATE
//! transaction: a failed insert rolls the catalog back to its previous state,
//! and readers on other connections observe either the old or the new catalog.

use std::collections::HashSet;

use super::connection::CatalogDb;
use super::entry::{CatalogEntry, SELECT_COLUMNS, join_list};
use crate::Error;
use chrono::Utc;
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite::{self, Connection, TransactionBehavior};

const INSERT_ENTRY: &str = "INSERT INTO rfc (
        id, title, authors, year, month, obsoleted_by, obsoletes, updates, updated_by,
        status, is_downloaded, created_at, updated_at
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
    ON CONFLICT(id) DO UPDATE SET
        title = excluded.title,
        authors = excluded.authors,
        year = excluded.year,
        month = excluded.month,
        obsoleted_by = excluded.obsoleted_by,
        obsoletes = excluded.obsoletes,
        updates = excluded.updates,
        updated_by = excluded.updated_by,
        status = excluded.status,
        is_downloaded = MAX(rfc.is_downloaded, excluded.is_downloaded),
        updated_at = excluded.updated_at";

/// Insert entries in order. A repeated id overwrites the earlier row.
fn insert_entries(
    conn: &Connection, entries: &[CatalogEntry], downloaded: &HashSet<String>, now: &str,
) -> Result<(), Error> {
    let mut stmt = conn.prepare_cached(INSERT_ENTRY)?;
    for entry in entries {
        let is_downloaded = entry.is_downloaded || downloaded.contains(&entry.id);
        stmt.execute(params![
            &entry.id,
            &entry.title,
            join_list(&entry.authors),
            &entry.year,
            &entry.month,
            join_list(&entry.obsoleted_by),
            join_list(&entry.obsoletes),
            join_list(&entry.updates),
            join_list(&entry.updated_by),
            &entry.status,
            is_downloaded as i32,
            now,
            now,
        ])?;
    }
    Ok(())
}

/// Append a row to the sync log and return the resulting catalog size.
fn record_sync(conn: &Connection, now: &str) -> Result<u64, Error> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM rfc", [], |row| row.get(0))?;
    conn.execute(
        "INSERT INTO rfc_update (update_date, entry_count) VALUES (?1, ?2)",
        params![now, count],
    )?;
    Ok(count as u64)
}

impl CatalogDb {
    /// Replace the whole catalog with `entries`.
    ///
    /// Every row is stamped with the same `created_at`/`updated_at`. The
    /// `is_downloaded` flag survives for ids present both before and after.
    pub async fn replace_all(&self, entries: &[CatalogEntry]) -> Result<(), Error> {
        let entries = entries.to_vec();
        let now = Utc::now().to_rfc3339();
        let stored = self
            .conn
            .call(move |conn| -> Result<u64, Error> {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

                let downloaded: HashSet<String> = {
                    let mut stmt = tx.prepare("SELECT id FROM rfc WHERE is_downloaded = 1")?;
                    stmt.query_map([], |row| row.get(0))?
                        .collect::<Result<HashSet<String>, rusqlite::Error>>()?
                };

                tx.execute("DELETE FROM rfc", [])?;
                insert_entries(&tx, &entries, &downloaded, &now)?;
                let stored = record_sync(&tx, &now)?;
                tx.commit()?;
                Ok(stored)
            })
            .await
            .map_err(Error::from)?;

        tracing::info!(entries = stored, "catalog replaced");
        Ok(())
    }

    /// Populate the catalog only if it is currently empty.
    ///
    /// Returns `true` if the entries were inserted, `false` if the catalog
    /// already held rows and nothing was written.
    pub async fn upsert_if_empty(&self, entries: &[CatalogEntry]) -> Result<bool, Error> {
        let entries = entries.to_vec();
        let now = Utc::now().to_rfc3339();
        let inserted = self
            .conn
            .call(move |conn| -> Result<Option<u64>, Error> {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

                let existing: i64 = tx.query_row("SELECT COUNT(*) FROM rfc", [], |row| row.get(0))?;
                if existing > 0 {
                    return Ok(None);
                }

                insert_entries(&tx, &entries, &HashSet::new(), &now)?;
                let stored = record_sync(&tx, &now)?;
                tx.commit()?;
                Ok(Some(stored))
            })
            .await
            .map_err(Error::from)?;

        match inserted {
            Some(stored) => {
                tracing::info!(entries = stored, "catalog bootstrapped");
                Ok(true)
            }
            None => {
                tracing::debug!("catalog already populated, bootstrap skipped");
                Ok(false)
            }
        }
    }

    /// List every entry in storage order.
    pub async fn list_all(&self) -> Result<Vec<CatalogEntry>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<CatalogEntry>, Error> {
                let mut stmt = conn.prepare(&format!("SELECT {SELECT_COLUMNS} FROM rfc"))?;
                let entries = stmt
                    .query_map([], CatalogEntry::from_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(entries)
            })
            .await
            .map_err(Error::from)
    }

    /// Get an entry by canonical id.
    ///
    /// Returns None if the id is not in the catalog.
    pub async fn get(&self, id: &str) -> Result<Option<CatalogEntry>, Error> {
        let id = id.to_string();
        self.conn
            .call(move |conn| -> Result<Option<CatalogEntry>, Error> {
                let result = conn.query_row(
                    &format!("SELECT {SELECT_COLUMNS} FROM rfc WHERE id = ?1"),
                    params![id],
                    CatalogEntry::from_row,
                );

                match result {
                    Ok(entry) => Ok(Some(entry)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Flag an entry as downloaded.
    ///
    /// Unknown ids are ignored.
    pub async fn mark_downloaded(&self, id: &str) -> Result<(), Error> {
        let key = id.to_string();
        let now = Utc::now().to_rfc3339();
        let updated = self
            .conn
            .call(move |conn| -> Result<usize, Error> {
                let updated = conn.execute(
                    "UPDATE rfc SET is_downloaded = 1, updated_at = ?2 WHERE id = ?1",
                    params![key, now],
                )?;
                Ok(updated)
            })
            .await
            .map_err(Error::from)?;

        if updated == 0 {
            tracing::debug!(id = %id, "mark_downloaded matched no catalog entry");
        }
        Ok(())
    }

    /// Total number of catalog entries.
    pub async fn count(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count: i64 = conn.query_row("SELECT COUNT(*) FROM rfc", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }

    /// Timestamp of the most recent successful catalog population.
    pub async fn last_synced_at(&self) -> Result<Option<String>, Error> {
        self.conn
            .call(|conn| -> Result<Option<String>, Error> {
                let result = conn.query_row(
                    "SELECT update_date FROM rfc_update ORDER BY id DESC LIMIT 1",
                    [],
                    |row| row.get(0),
                );

                match result {
                    Ok(date) => Ok(Some(date)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            authors: vec!["J. Postel".to_string(), "J. Reynolds".to_string()],
            year: "1985".to_string(),
            month: "October".to_string(),
            status: "INTERNET STANDARD".to_string(),
            ..Default::default()
        }
    }

    fn ids(entries: &[CatalogEntry]) -> HashSet<String> {
        entries.iter().map(|e| e.id.clone()).collect()
    }

    #[tokio::test]
    async fn test_replace_all_and_list() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.replace_all(&[entry("rfc959", "File Transfer Protocol"), entry("rfc854", "Telnet")])
            .await
            .unwrap();

        let listed = db.list_all().await.unwrap();
        assert_eq!(ids(&listed), HashSet::from(["rfc959".to_string(), "rfc854".to_string()]));

        let ftp = listed.iter().find(|e| e.id == "rfc959").unwrap();
        assert_eq!(ftp.authors, vec!["J. Postel", "J. Reynolds"]);
        assert!(!ftp.is_downloaded);
        assert!(!ftp.created_at.is_empty());
        assert_eq!(ftp.created_at, ftp.updated_at);
    }

    #[tokio::test]
    async fn test_replace_all_clears_previous() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.replace_all(&[entry("rfc1", "Host Software")]).await.unwrap();
        db.replace_all(&[entry("rfc2", "Host Software"), entry("rfc3", "Documentation Conventions")])
            .await
            .unwrap();

        let listed = db.list_all().await.unwrap();
        assert_eq!(ids(&listed), HashSet::from(["rfc2".to_string(), "rfc3".to_string()]));
    }

    #[tokio::test]
    async fn test_relations_flattened_and_restored() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        let mut e = entry("rfc200", "Relations");
        e.obsoletes = vec!["rfc100".to_string(), "rfc101".to_string()];
        db.replace_all(&[e]).await.unwrap();

        let stored: String = db
            .conn
            .call(|conn| {
                conn.query_row("SELECT obsoletes FROM rfc WHERE id = 'rfc200'", [], |row| row.get(0))
            })
            .await
            .unwrap();
        assert_eq!(stored, "rfc100, rfc101");

        let updates: String = db
            .conn
            .call(|conn| conn.query_row("SELECT updates FROM rfc WHERE id = 'rfc200'", [], |row| row.get(0)))
            .await
            .unwrap();
        assert_eq!(updates, "");

        let read = db.get("rfc200").await.unwrap().unwrap();
        assert_eq!(read.obsoletes, vec!["rfc100", "rfc101"]);
        assert!(read.updates.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_ids_last_wins() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.replace_all(&[entry("rfc42", "first"), entry("rfc42", "second")])
            .await
            .unwrap();

        assert_eq!(db.count().await.unwrap(), 1);
        let stored = db.get("rfc42").await.unwrap().unwrap();
        assert_eq!(stored.title, "second");
    }

    #[tokio::test]
    async fn test_replace_all_keeps_downloaded_flag() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.replace_all(&[entry("rfc1", "a"), entry("rfc2", "b")]).await.unwrap();
        db.mark_downloaded("rfc1").await.unwrap();

        db.replace_all(&[entry("rfc1", "a (revised)"), entry("rfc2", "b")])
            .await
            .unwrap();

        assert!(db.get("rfc1").await.unwrap().unwrap().is_downloaded);
        assert!(!db.get("rfc2").await.unwrap().unwrap().is_downloaded);
    }

    #[tokio::test]
    async fn test_replace_all_rolls_back_on_failure() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.replace_all(&[entry("rfc1", "a"), entry("rfc2", "b")]).await.unwrap();

        db.conn
            .call(|conn| {
                conn.execute_batch(
                    "CREATE TRIGGER reject_rfc666 BEFORE INSERT ON rfc WHEN NEW.id = 'rfc666'
                     BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
                )
            })
            .await
            .unwrap();

        let result = db.replace_all(&[entry("rfc3", "c"), entry("rfc666", "bad")]).await;
        assert!(matches!(result, Err(Error::Database(_))));

        let listed = db.list_all().await.unwrap();
        assert_eq!(ids(&listed), HashSet::from(["rfc1".to_string(), "rfc2".to_string()]));
    }

    #[tokio::test]
    async fn test_upsert_if_empty() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        assert!(db.upsert_if_empty(&[entry("rfc1", "a")]).await.unwrap());
        assert!(!db.upsert_if_empty(&[entry("rfc2", "b")]).await.unwrap());

        let listed = db.list_all().await.unwrap();
        assert_eq!(ids(&listed), HashSet::from(["rfc1".to_string()]));
    }

    #[tokio::test]
    async fn test_mark_downloaded() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.replace_all(&[entry("rfc2616", "HTTP/1.1")]).await.unwrap();

        db.mark_downloaded("rfc2616").await.unwrap();
        assert!(db.get("rfc2616").await.unwrap().unwrap().is_downloaded);
    }

    #[tokio::test]
    async fn test_mark_downloaded_missing_is_noop() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.replace_all(&[entry("rfc1", "a")]).await.unwrap();

        db.mark_downloaded("rfc9999").await.unwrap();
        assert_eq!(db.count().await.unwrap(), 1);
        assert!(db.get("rfc9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_last_synced_at() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        assert!(db.last_synced_at().await.unwrap().is_none());

        db.upsert_if_empty(&[entry("rfc1", "a")]).await.unwrap();
        assert!(db.last_synced_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_skipped_bootstrap_not_logged() {
        let db = CatalogDb::open_in_memory().await.unwrap();
        db.upsert_if_empty(&[entry("rfc1", "a")]).await.unwrap();
        db.upsert_if_empty(&[entry("rfc2", "b")]).await.unwrap();

        let syncs: i64 = db
            .conn
            .call(|conn| conn.query_row("SELECT COUNT(*) FROM rfc_update", [], |row| row.get(0)))
            .await
            .unwrap();
        assert_eq!(syncs, 1);
    }
}
