/*!
 * JSON-lines file record store.
 *
 * Each record is one line of JSON appended to the file. The file is
 * re-read for every `get_all`, and every `insert` takes its id from the
 * current end of the file, so handles appending in turn never reuse an id.
 * Handles in separate processes must not append at the same instant.
 */

use async_trait::async_trait;
use log::{debug, info, warn};
use parking_lot::Mutex;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::models::{Entity, RecordId};
use super::store::Repository;
use crate::errors::StorageError;

struct FileState {
    path: PathBuf,
    /// Append handle; `None` once disposed
    writer: Option<File>,
    next_id: RecordId,
}

/// Append-only JSON-lines repository
pub struct JsonFileRepository<T> {
    state: Arc<Mutex<FileState>>,
    _records: PhantomData<fn() -> T>,
}

impl<T> Clone for JsonFileRepository<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            _records: PhantomData,
        }
    }
}

impl<T> JsonFileRepository<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    /// Open (or create) the store at `path`, resuming ids after the last stored record
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening record file at: {:?}", path);

        let writer = OpenOptions::new().create(true).append(true).open(&path)?;
        let existing: Vec<T> = read_records(&path)?;
        let next_id = existing
            .last()
            .map(|record| record.id().next())
            .unwrap_or(RecordId::FIRST);

        debug!("Loaded {} existing records, next id {}", existing.len(), next_id);

        Ok(Self {
            state: Arc::new(Mutex::new(FileState {
                path,
                writer: Some(writer),
                next_id,
            })),
            _records: PhantomData,
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> PathBuf {
        self.state.lock().path.clone()
    }
}

/// Read every record, checking that ids are strictly ascending
fn read_records<T>(path: &Path) -> Result<Vec<T>, StorageError>
where
    T: Entity + DeserializeOwned,
{
    let reader = BufReader::new(File::open(path)?);
    let mut records: Vec<T> = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let record: T = serde_json::from_str(&line).map_err(|e| StorageError::Corrupted {
            line: index + 1,
            message: e.to_string(),
        })?;

        if let Some(previous) = records.last() {
            if record.id() <= previous.id() {
                return Err(StorageError::Corrupted {
                    line: index + 1,
                    message: format!(
                        "record id {} does not follow id {}",
                        record.id(),
                        previous.id()
                    ),
                });
            }
        }

        records.push(record);
    }

    Ok(records)
}

/// Id following the last record currently in the file
fn next_id_on_disk<T>(path: &Path) -> Result<RecordId, StorageError>
where
    T: Entity + DeserializeOwned,
{
    let records: Vec<T> = read_records(path)?;
    Ok(records
        .last()
        .map(|record| record.id().next())
        .unwrap_or(RecordId::FIRST))
}

/// Append one line and sync it, cutting the file back if any step fails
fn append_line(writer: &mut File, line: &str) -> Result<(), StorageError> {
    let start = writer.metadata()?.len();

    let written = writeln!(writer, "{}", line)
        .and_then(|_| writer.flush())
        .and_then(|_| writer.sync_data());

    if let Err(e) = written {
        if let Err(rollback) = writer.set_len(start) {
            warn!("Failed to roll back partial record: {}", rollback);
        }
        return Err(e.into());
    }

    Ok(())
}

#[async_trait]
impl<T> Repository<T> for JsonFileRepository<T>
where
    T: Entity + Serialize + DeserializeOwned,
{
    async fn insert(&self, draft: T::Draft) -> Result<T, StorageError> {
        let state = Arc::clone(&self.state);

        tokio::task::spawn_blocking(move || {
            let mut state = state.lock();
            if state.writer.is_none() {
                return Err(StorageError::Disposed);
            }

            // Another handle may have appended since our last write
            let id = next_id_on_disk::<T>(&state.path)?.max(state.next_id);

            let record = T::from_draft(id, draft);
            let line = serde_json::to_string(&record)?;
            let writer = state.writer.as_mut().ok_or(StorageError::Disposed)?;
            append_line(writer, &line)?;

            state.next_id = id.next();
            debug!("Appended record {} to {:?}", id, state.path);
            Ok(record)
        })
        .await?
    }

    async fn get_all(&self) -> Result<Vec<T>, StorageError> {
        let state = Arc::clone(&self.state);

        tokio::task::spawn_blocking(move || {
            let state = state.lock();
            if state.writer.is_none() {
                return Err(StorageError::Disposed);
            }
            read_records(&state.path)
        })
        .await?
    }

    fn dispose(&self) -> Result<(), StorageError> {
        let mut state = self.state.lock();

        if let Some(file) = state.writer.take() {
            file.sync_all()?;
            info!("Closed record file at: {:?}", state.path);
        }

        Ok(())
    }
}
