/*!
 * SQLite-backed argument store.
 *
 * This module maps `ArgumentsRecord` onto the `arguments` table,
 * abstracting away the SQL details behind the `Repository` trait.
 */

use async_trait::async_trait;
use log::debug;
use rusqlite::params;
use std::path::Path;

use super::connection::DatabaseConnection;
use super::models::{ArgumentsRecord, Entity, NewArguments, RecordId};
use super::store::Repository;
use crate::errors::StorageError;

/// Repository for persisted argument pairs
#[derive(Clone)]
pub struct SqliteArgumentsRepository {
    /// Database connection
    db: DatabaseConnection,
}

impl SqliteArgumentsRepository {
    /// Create a new repository with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Open (or create) a database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = DatabaseConnection::new(path)?;
        Ok(Self::new(db))
    }

    /// Create a repository with an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        let db = DatabaseConnection::new_in_memory()?;
        Ok(Self::new(db))
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl Repository<ArgumentsRecord> for SqliteArgumentsRepository {
    async fn insert(&self, draft: NewArguments) -> Result<ArgumentsRecord, StorageError> {
        self.db
            .transaction_async(move |tx| {
                tx.execute(
                    "INSERT INTO arguments (arg1, arg2) VALUES (?1, ?2)",
                    params![draft.arg1, draft.arg2],
                )?;
                let id = RecordId::new(tx.last_insert_rowid());

                debug!("Inserted arguments record {}", id);
                Ok(ArgumentsRecord::from_draft(id, draft))
            })
            .await
    }

    async fn get_all(&self) -> Result<Vec<ArgumentsRecord>, StorageError> {
        self.db
            .execute_async(|conn| {
                let mut stmt =
                    conn.prepare("SELECT id, arg1, arg2 FROM arguments ORDER BY id ASC")?;

                let records = stmt
                    .query_map([], |row| {
                        Ok(ArgumentsRecord {
                            id: RecordId::new(row.get(0)?),
                            arg1: row.get(1)?,
                            arg2: row.get(2)?,
                        })
                    })?
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(records)
            })
            .await
    }

    fn dispose(&self) -> Result<(), StorageError> {
        self.db.close()
    }
}
