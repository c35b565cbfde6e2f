//! `SQLite` schema for the key-value record table.
//!
//! The schema version lives in `PRAGMA user_version`; a fresh database
//! reports 0 and is brought up to [`SCHEMA_VERSION`] step by step.

use rusqlite::Connection;
use tracing::debug;

use crate::error::{Error, Result};

/// The schema version this build writes.
pub const SCHEMA_VERSION: i32 = 1;

/// SQL statement to create the key-value table holding serialized collections.
pub const CREATE_RECORDS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS records (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// Bring the database schema up to [`SCHEMA_VERSION`].
///
/// Safe to call on every open.
///
/// # Errors
///
/// Returns an error if the database reports a newer schema than this build
/// understands, or if a migration statement fails.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    let mut version = schema_version(conn)?;

    if version > SCHEMA_VERSION {
        return Err(Error::DatabaseMigration {
            message: format!(
                "database schema version {version} is newer than supported version {SCHEMA_VERSION}"
            ),
        });
    }

    while version < SCHEMA_VERSION {
        version += 1;
        apply(conn, version)?;
        conn.pragma_update(None, "user_version", version)?;
        debug!("Migrated record schema to version {}", version);
    }

    Ok(())
}

/// Read the schema version stored in the database header.
///
/// # Errors
///
/// Returns an error if the pragma cannot be queried.
pub fn schema_version(conn: &Connection) -> Result<i32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
    Ok(version)
}

fn apply(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => {
            conn.execute_batch(CREATE_RECORDS_TABLE)?;
            Ok(())
        }
        _ => Err(Error::DatabaseMigration {
            message: format!("unknown migration version: {version}"),
        }),
    }
}
