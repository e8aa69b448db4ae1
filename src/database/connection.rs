/*!
 * Database connection management.
 *
 * This module handles SQLite database connection creation, initialization,
 * teardown, and provides async-safe access patterns using tokio's spawn_blocking.
 */

use log::{debug, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::schema;
use crate::errors::StorageError;

/// Database connection wrapper with thread-safe access
///
/// The connection slot is emptied by `close`; every later operation
/// fails with `StorageError::Disposed`.
#[derive(Clone)]
pub struct DatabaseConnection {
    /// Path to the database file
    db_path: PathBuf,
    /// Thread-safe connection wrapped in Arc<Mutex>
    connection: Arc<Mutex<Option<Connection>>>,
}

impl DatabaseConnection {
    /// Create a new database connection at the specified path
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self, StorageError> {
        let db_path = db_path.as_ref().to_path_buf();

        // Ensure parent directory exists
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening database at: {:?}", db_path);

        let conn = Connection::open(&db_path)?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path,
            connection: Arc::new(Mutex::new(Some(conn))),
        })
    }

    /// Create an in-memory database (for testing)
    pub fn new_in_memory() -> Result<Self, StorageError> {
        debug!("Creating in-memory database");

        let conn = Connection::open_in_memory()?;
        schema::initialize_schema(&conn)?;

        Ok(Self {
            db_path: PathBuf::from(":memory:"),
            connection: Arc::new(Mutex::new(Some(conn))),
        })
    }

    /// Get the database file path
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Whether `close` has already released the connection
    pub fn is_closed(&self) -> bool {
        self.connection
            .lock()
            .map(|guard| guard.is_none())
            .unwrap_or(true)
    }

    /// Execute a database operation with the connection
    ///
    /// This method acquires the mutex lock and executes the provided closure
    /// with access to the connection. For async contexts, use `execute_async`.
    pub fn execute<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.connection.lock()?;
        let conn = guard.as_ref().ok_or(StorageError::Disposed)?;

        f(conn)
    }

    /// Execute a database operation asynchronously using spawn_blocking
    ///
    /// This is the preferred method for async contexts as it prevents
    /// blocking the async runtime.
    pub async fn execute_async<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let guard = connection.lock()?;
            let conn = guard.as_ref().ok_or(StorageError::Disposed)?;

            f(conn)
        })
        .await?
    }

    /// Begin an async transaction and execute operations within it
    pub async fn transaction_async<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&rusqlite::Transaction) -> Result<T, StorageError> + Send + 'static,
        T: Send + 'static,
    {
        let connection = self.connection.clone();

        tokio::task::spawn_blocking(move || {
            let mut guard = connection.lock()?;
            let conn = guard.as_mut().ok_or(StorageError::Disposed)?;

            let tx = conn.transaction()?;
            let result = f(&tx)?;
            tx.commit()?;

            Ok(result)
        })
        .await?
    }

    /// Close the connection; calling it again is a no-op
    pub fn close(&self) -> Result<(), StorageError> {
        let mut guard = self.connection.lock()?;

        if let Some(conn) = guard.take() {
            conn.close().map_err(|(_, e)| StorageError::Database(e))?;
            info!("Closed database at: {:?}", self.db_path);
        }

        Ok(())
    }
}
