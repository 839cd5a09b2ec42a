//! Export/import of the entry collection as a JSON array of records.
//!
//! # Responsibility
//! - Serialize entries to the portable [`EntryRecord`] shape.
//! - Parse and validate an import payload before anything is written.
//!
//! # Invariants
//! - Import never reuses identities; `createdAt` and content are preserved.
//! - A payload is imported completely or not at all.
//! - A top-level JSON `null` is an empty import.

pub mod record;

pub use record::EntryRecord;

use crate::model::entry::{EntryValidationError, JournalEntry};
use crate::repo::entry_repo::{EntryRepository, RepoError};
use crate::service::entry_store::EntryStore;
use chrono::{DateTime, Utc};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::Write;

pub type TransferResult<T> = Result<T, TransferError>;

#[derive(Debug)]
pub enum TransferError {
    /// Payload is not a JSON array of records.
    Json(serde_json::Error),
    /// `createdAt` of the record at `index` is not a representable instant.
    InvalidTimestamp { index: usize, value: i64 },
    /// Record at `index` violates an entry invariant.
    InvalidRecord {
        index: usize,
        source: EntryValidationError,
    },
    Repo(RepoError),
}

impl Display for TransferError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(err) => write!(f, "invalid export payload: {err}"),
            Self::InvalidTimestamp { index, value } => {
                write!(f, "record {index}: createdAt `{value}` is out of range")
            }
            Self::InvalidRecord { index, source } => write!(f, "record {index}: {source}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Json(err) => Some(err),
            Self::InvalidTimestamp { .. } => None,
            Self::InvalidRecord { source, .. } => Some(source),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for TransferError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<RepoError> for TransferError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Suggested file name for an export created at `now`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("journal_export_{}.json", now.timestamp_millis())
}

pub fn to_records(entries: &[JournalEntry]) -> Vec<EntryRecord> {
    entries.iter().map(EntryRecord::from_entry).collect()
}

/// Serializes entries as a JSON array string.
pub fn export_json(entries: &[JournalEntry]) -> TransferResult<String> {
    Ok(serde_json::to_string(&to_records(entries))?)
}

/// Streams the JSON array into `writer`.
pub fn write_export<W: Write>(writer: W, entries: &[JournalEntry]) -> TransferResult<()> {
    serde_json::to_writer(writer, &to_records(entries))?;
    Ok(())
}

/// Parses an import payload into validated entries with fresh identities.
pub fn parse_import(json: &str) -> TransferResult<Vec<JournalEntry>> {
    let records = serde_json::from_str::<Option<Vec<EntryRecord>>>(json)?.unwrap_or_default();

    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            let value = record.created_at;
            let entry = record
                .into_entry()
                .ok_or(TransferError::InvalidTimestamp { index, value })?;
            entry
                .validate()
                .map_err(|source| TransferError::InvalidRecord { index, source })?;
            Ok(entry)
        })
        .collect()
}

/// Parses `json` and appends every record to `store` in one transaction.
///
/// Returns the number of imported entries.
pub fn import_json<R: EntryRepository>(
    store: &mut EntryStore<R>,
    json: &str,
) -> TransferResult<usize> {
    let entries = parse_import(json).inspect_err(|err| {
        error!("event=entry_import module=transfer status=error error={err}");
    })?;
    let count = store.import_entries(&entries)?;
    info!("event=entry_import module=transfer status=ok count={count}");
    Ok(count)
}
