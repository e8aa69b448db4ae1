/*!
 * In-memory record store.
 *
 * Records live only as long as the process; useful for tests and for
 * sessions that should not leave anything behind.
 */

use async_trait::async_trait;
use log::debug;
use parking_lot::RwLock;
use std::sync::Arc;

use super::models::{Entity, RecordId};
use super::store::Repository;
use crate::errors::StorageError;

struct MemoryState<T> {
    records: Vec<T>,
    next_id: RecordId,
    disposed: bool,
}

/// Thread-safe in-memory repository
///
/// Id assignment and the push happen under one write lock.
pub struct InMemoryRepository<T> {
    state: Arc<RwLock<MemoryState<T>>>,
}

impl<T> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                records: Vec::new(),
                next_id: RecordId::FIRST,
                disposed: false,
            })),
        }
    }

    /// Number of records currently held
    pub fn len(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn insert(&self, draft: T::Draft) -> Result<T, StorageError> {
        let mut state = self.state.write();
        if state.disposed {
            return Err(StorageError::Disposed);
        }

        let id = state.next_id;
        let record = T::from_draft(id, draft);
        state.records.push(record.clone());
        state.next_id = id.next();

        debug!("Stored record {} in memory", id);
        Ok(record)
    }

    async fn get_all(&self) -> Result<Vec<T>, StorageError> {
        let state = self.state.read();
        if state.disposed {
            return Err(StorageError::Disposed);
        }

        Ok(state.records.clone())
    }

    fn dispose(&self) -> Result<(), StorageError> {
        let mut state = self.state.write();
        if !state.disposed {
            state.disposed = true;
            state.records.clear();
            debug!("Disposed in-memory repository");
        }
        Ok(())
    }
}
