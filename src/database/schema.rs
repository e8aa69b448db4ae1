/*!
 * Database schema definitions and migrations.
 *
 * This module contains the SQL schema for the argument store
 * and refuses databases written by a newer schema version.
 */

use log::{debug, info};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::StorageError;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the database schema
pub fn initialize_schema(conn: &Connection) -> Result<(), StorageError> {
    let current_version = get_schema_version(conn)?;

    if current_version == 0 {
        info!("Initializing database schema v{}", SCHEMA_VERSION);
        create_all_tables(conn)?;
        set_schema_version(conn, SCHEMA_VERSION)?;
    } else if current_version > SCHEMA_VERSION {
        return Err(StorageError::Corrupted {
            line: 0,
            message: format!(
                "database schema v{} is newer than supported v{}",
                current_version, SCHEMA_VERSION
            ),
        });
    } else {
        debug!("Database schema is up to date (v{})", current_version);
    }

    Ok(())
}

/// Get the current schema version from the database
fn get_schema_version(conn: &Connection) -> Result<i32, StorageError> {
    let table_exists: bool = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='schema_version'",
        [],
        |row| row.get(0),
    )?;

    if !table_exists {
        return Ok(0);
    }

    // An empty table means creation was interrupted; redo it
    let version: Option<i32> = conn
        .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        })
        .optional()?;

    Ok(version.unwrap_or(0))
}

/// Set the schema version in the database
fn set_schema_version(conn: &Connection, version: i32) -> Result<(), StorageError> {
    conn.execute(
        "INSERT OR REPLACE INTO schema_version (id, version, updated_at) VALUES (1, ?1, datetime('now'))",
        [version],
    )?;
    Ok(())
}

/// Create all database tables
fn create_all_tables(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            version INTEGER NOT NULL,
            updated_at TEXT NOT NULL
        );
        "#,
    )?;

    // AUTOINCREMENT keeps ids strictly ascending and never reused
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS arguments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            arg1 TEXT NOT NULL CHECK (length(arg1) BETWEEN 1 AND 50),
            arg2 TEXT NOT NULL CHECK (length(arg2) BETWEEN 1 AND 50)
        );
        "#,
    )?;

    info!("Database schema created successfully");
    Ok(())
}
