//! Journal schema migrations.
//!
//! # Responsibility
//! - Bring a journal database from any older schema to [`latest_version`].
//! - Refuse databases written by a newer build.
//!
//! # Invariants
//! - Step `n` is `000n_<name>.sql`; versions are dense and start at 1.
//! - A shipped step is never edited; schema changes add a new step.
//! - All pending steps run in one transaction together with the
//!   `PRAGMA user_version` bumps, so a failed upgrade leaves the previous
//!   schema and its entries untouched.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

#[derive(Debug, Clone, Copy)]
struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

impl Migration {
    fn apply(&self, tx: &Transaction<'_>) -> DbResult<()> {
        tx.execute_batch(self.sql)?;
        tx.pragma_update(None, "user_version", self.version)?;
        debug!(
            "event=db_migrate module=db status=ok version={} name={}",
            self.version, self.name
        );
        Ok(())
    }
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "entries",
        sql: include_str!("0001_entries.sql"),
    },
    Migration {
        version: 2,
        name: "preferences",
        sql: include_str!("0002_preferences.sql"),
    },
];

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Upgrades the journal schema in place.
///
/// # Errors
/// - [`DbError::UnsupportedSchemaVersion`] when the file is newer than this build.
/// - [`DbError::Sqlite`] when a step fails; nothing is committed then.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let current = schema_version(conn)?;
    let latest = latest_version();
    if current > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current,
            latest_supported: latest,
        });
    }

    let mut pending = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > current)
        .peekable();
    if pending.peek().is_none() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in pending {
        migration.apply(&tx)?;
    }
    tx.commit()?;
    info!("event=db_migrate module=db status=ok from={current} to={latest}");
    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}
