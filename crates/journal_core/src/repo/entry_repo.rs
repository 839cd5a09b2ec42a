//! Entry repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the canonical `entries` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `JournalEntry::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - `list_entries` orders by `created_at` desc, newest insert first on ties.

use crate::db::DbError;
use crate::model::entry::{EntryId, EntryValidationError, JournalEntry, Toggles};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT
    uuid,
    created_at,
    title,
    body,
    mood_emojis,
    mood_rating,
    toggle_x,
    toggle_y,
    toggle_z,
    toggle_w,
    sleep_hours
FROM entries";

const ENTRY_INSERT_SQL: &str = "INSERT INTO entries (
    uuid,
    created_at,
    title,
    body,
    mood_emojis,
    mood_rating,
    toggle_x,
    toggle_y,
    toggle_z,
    toggle_w,
    sleep_hours
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry and preference persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
    /// Todo text is blank after trim.
    BlankTodo,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::BlankTodo => write!(f, "todo text must not be blank"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::BlankTodo => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for journal entries.
pub trait EntryRepository {
    fn create_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId>;
    /// Inserts every entry or none of them.
    fn create_entries(&self, entries: &[JournalEntry]) -> RepoResult<usize>;
    fn replace_entry(&self, entry: &JournalEntry) -> RepoResult<()>;
    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>>;
    fn list_entries(&self) -> RepoResult<Vec<JournalEntry>>;
    fn delete_entry(&self, id: EntryId) -> RepoResult<()>;
    fn clear_entries(&self) -> RepoResult<usize>;
}

/// SQLite-backed entry repository.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create_entry(&self, entry: &JournalEntry) -> RepoResult<EntryId> {
        entry.validate()?;
        insert_entry(self.conn, entry)?;
        Ok(entry.id)
    }

    fn create_entries(&self, entries: &[JournalEntry]) -> RepoResult<usize> {
        for entry in entries {
            entry.validate()?;
        }

        // Immediate: take the write lock before the first insert.
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        for entry in entries {
            insert_entry(&tx, entry)?;
        }
        tx.commit()?;

        Ok(entries.len())
    }

    fn replace_entry(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        let changed = self.conn.execute(
            "UPDATE entries
             SET
                created_at = ?1,
                title = ?2,
                body = ?3,
                mood_emojis = ?4,
                mood_rating = ?5,
                toggle_x = ?6,
                toggle_y = ?7,
                toggle_z = ?8,
                toggle_w = ?9,
                sleep_hours = ?10
             WHERE uuid = ?11;",
            params![
                entry.created_at.timestamp_millis(),
                entry.title.as_str(),
                entry.body.as_str(),
                encode_emojis(&entry.mood_emojis)?,
                entry.mood_rating,
                entry.toggles.x,
                entry.toggles.y,
                entry.toggles.z,
                entry.toggles.w,
                entry.sleep_hours,
                entry.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(entry.id));
        }

        Ok(())
    }

    fn get_entry(&self, id: EntryId) -> RepoResult<Option<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn list_entries(&self) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL} ORDER BY created_at DESC, rowid DESC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn delete_entry(&self, id: EntryId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM entries WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn clear_entries(&self) -> RepoResult<usize> {
        Ok(self.conn.execute("DELETE FROM entries;", [])?)
    }
}

fn insert_entry(conn: &Connection, entry: &JournalEntry) -> RepoResult<()> {
    conn.execute(
        ENTRY_INSERT_SQL,
        params![
            entry.id.to_string(),
            entry.created_at.timestamp_millis(),
            entry.title.as_str(),
            entry.body.as_str(),
            encode_emojis(&entry.mood_emojis)?,
            entry.mood_rating,
            entry.toggles.x,
            entry.toggles.y,
            entry.toggles.z,
            entry.toggles.w,
            entry.sleep_hours,
        ],
    )?;
    Ok(())
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in entries.uuid"))
    })?;

    let created_millis: i64 = row.get("created_at")?;
    let created_at = DateTime::<Utc>::from_timestamp_millis(created_millis).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid created_at value `{created_millis}` in entries.created_at"
        ))
    })?;

    let emojis_text: String = row.get("mood_emojis")?;
    let mood_emojis = serde_json::from_str::<Vec<String>>(&emojis_text).map_err(|err| {
        RepoError::InvalidData(format!("invalid entries.mood_emojis `{emojis_text}`: {err}"))
    })?;

    let entry = JournalEntry {
        id,
        created_at,
        title: row.get("title")?,
        body: row.get("body")?,
        mood_emojis,
        mood_rating: row.get("mood_rating")?,
        toggles: Toggles {
            x: parse_flag(row, "toggle_x")?,
            y: parse_flag(row, "toggle_y")?,
            z: parse_flag(row, "toggle_z")?,
            w: parse_flag(row, "toggle_w")?,
        },
        sleep_hours: row.get("sleep_hours")?,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_flag(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match row.get::<_, i64>(column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid flag value `{other}` in entries.{column}"
        ))),
    }
}

fn encode_emojis(emojis: &[String]) -> RepoResult<String> {
    serde_json::to_string(emojis)
        .map_err(|err| RepoError::InvalidData(format!("cannot encode mood emojis: {err}")))
}
