//! Decoding of the RFC Editor index (`rfc-index.xml`).
//!
//! Only `<rfc-entry>` elements are read. BCP/FYI/STD entries, not-issued
//! entries and any child elements not listed below are skipped.
//!
//! ```xml
//! <rfc-index>
//!   <rfc-entry>
//!     <doc-id>RFC0001</doc-id>
//!     <title>Host Software</title>
//!     <author><name>S. Crocker</name></author>
//!     <date><month>April</month><year>1969</year></date>
//!     <obsoleted-by><doc-id>RFC0100</doc-id></obsoleted-by>
//!     <current-status>UNKNOWN</current-status>
//!   </rfc-entry>
//! </rfc-index>
//! ```

use quick_xml::Reader;
use quick_xml::events::Event;
use serde::Deserialize;

use crate::catalog::CatalogEntry;
use crate::{Error, id};

/// Name of the document element every index must have.
const ROOT: &[u8] = b"rfc-index";

#[derive(Debug, Deserialize)]
struct RfcIndex {
    #[serde(rename = "rfc-entry", default)]
    entries: Vec<RfcEntry>,
}

#[derive(Debug, Deserialize)]
struct RfcEntry {
    #[serde(rename = "doc-id")]
    doc_id: String,
    #[serde(default)]
    title: String,
    #[serde(rename = "author", default)]
    authors: Vec<Author>,
    #[serde(default)]
    date: RfcDate,
    #[serde(rename = "current-status", default)]
    status: String,
    #[serde(default)]
    obsoletes: DocIdList,
    #[serde(rename = "obsoleted-by", default)]
    obsoleted_by: DocIdList,
    #[serde(default)]
    updates: DocIdList,
    #[serde(rename = "updated-by", default)]
    updated_by: DocIdList,
}

#[derive(Debug, Default, Deserialize)]
struct Author {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Default, Deserialize)]
struct RfcDate {
    #[serde(default)]
    year: String,
    #[serde(default)]
    month: String,
}

#[derive(Debug, Default, Deserialize)]
struct DocIdList {
    #[serde(rename = "doc-id", default)]
    ids: Vec<String>,
}

impl From<RfcEntry> for CatalogEntry {
    fn from(entry: RfcEntry) -> Self {
        CatalogEntry {
            id: id::normalize(&entry.doc_id),
            title: entry.title,
            authors: entry.authors.into_iter().map(|a| a.name).collect(),
            year: entry.date.year,
            month: entry.date.month,
            obsoletes: entry.obsoletes.ids,
            obsoleted_by: entry.obsoleted_by.ids,
            updates: entry.updates.ids,
            updated_by: entry.updated_by.ids,
            status: entry.status,
            ..Default::default()
        }
    }
}

/// Parse index bytes into catalog entries, in document order.
///
/// Entry ids are canonicalized; related ids are kept as published. Any
/// malformed or truncated input fails the whole parse, as does a
/// well-formed document whose root is not `<rfc-index>`.
pub fn parse_index(bytes: &[u8]) -> Result<Vec<CatalogEntry>, Error> {
    check_root(bytes)?;
    let index: RfcIndex = quick_xml::de::from_reader(bytes)?;
    let entries: Vec<CatalogEntry> = index.entries.into_iter().map(CatalogEntry::from).collect();
    tracing::debug!(entries = entries.len(), bytes = bytes.len(), "parsed rfc index");
    Ok(entries)
}

/// Reject documents whose first element is not [`ROOT`].
///
/// The deserializer ignores the root name, so an HTML error page would
/// otherwise decode as an empty index.
fn check_root(bytes: &[u8]) -> Result<(), Error> {
    let mut reader = Reader::from_reader(bytes);
    let mut buf = Vec::new();
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) => {
                if e.local_name().as_ref() == ROOT {
                    return Ok(());
                }
                let found = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                return Err(Error::Decode(format!("expected <rfc-index> root, found <{found}>")));
            }
            Ok(Event::Eof) => return Err(Error::Decode("no root element".into())),
            Ok(_) => buf.clear(),
            Err(e) => return Err(Error::Decode(e.to_string())),
        }
    }
}
