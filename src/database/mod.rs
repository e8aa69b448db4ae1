/*!
 * Database module for persistent storage of argument pairs.
 *
 * This module provides:
 * - The generic `Repository` trait and its scoped-disposal guard
 * - In-memory, JSON-lines file and SQLite backends
 * - `open_repository`, which picks a backend from configuration
 */

pub mod connection;
pub mod json_file;
pub mod memory;
pub mod models;
pub mod repository;
pub mod schema;
pub mod store;

use log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::app_config::{StorageBackend, StorageConfig};
use crate::errors::StorageError;

// Re-export main types
pub use connection::DatabaseConnection;
pub use json_file::JsonFileRepository;
pub use memory::InMemoryRepository;
pub use models::{ArgumentsRecord, Entity, NewArguments, RecordId};
pub use repository::SqliteArgumentsRepository;
pub use store::{Repository, RepositoryScope};

/// Directory name under the user's data directory
const DEFAULT_DATA_DIRNAME: &str = "argstash";

/// Get the default storage file for a backend
pub fn default_storage_path(backend: StorageBackend) -> Result<PathBuf, StorageError> {
    let base_dir = dirs::data_local_dir()
        .or_else(dirs::data_dir)
        .or_else(|| dirs::home_dir().map(|h| h.join(".local").join("share")))
        .ok_or_else(|| {
            StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;

    let filename = match backend {
        StorageBackend::Json => "argstash.jsonl",
        StorageBackend::Sqlite | StorageBackend::Memory => "argstash.db",
    };

    Ok(base_dir.join(DEFAULT_DATA_DIRNAME).join(filename))
}

/// Open the repository described by `config`
pub fn open_repository(
    config: &StorageConfig,
) -> Result<Arc<dyn Repository<ArgumentsRecord>>, StorageError> {
    let repository: Arc<dyn Repository<ArgumentsRecord>> = match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory storage, records are discarded at exit");
            Arc::new(InMemoryRepository::<ArgumentsRecord>::new())
        }
        StorageBackend::Json => {
            let path = resolve_path(config)?;
            Arc::new(JsonFileRepository::<ArgumentsRecord>::open(path)?)
        }
        StorageBackend::Sqlite => {
            let path = resolve_path(config)?;
            Arc::new(SqliteArgumentsRepository::open(path)?)
        }
    };

    Ok(repository)
}

fn resolve_path(config: &StorageConfig) -> Result<PathBuf, StorageError> {
    match &config.path {
        Some(path) => Ok(path.clone()),
        None => default_storage_path(config.backend),
    }
}
