/*!
 * Generic record store abstraction.
 *
 * `Repository` is the seam between the session and whatever holds the
 * records. Backends live next to this module (`memory`, `json_file`,
 * `repository` for SQLite) and are picked by `open_repository`.
 */

use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

use super::models::Entity;
use crate::errors::StorageError;

/// Ordered store that assigns identities on insert
///
/// Implementations must keep identity assignment and snapshot reads
/// correct under concurrent callers, even though the interactive session
/// only ever issues one call at a time.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Persist a draft and return it with its freshly assigned identity
    ///
    /// Identities are unique and strictly ascending in call order.
    async fn insert(&self, draft: T::Draft) -> Result<T, StorageError>;

    /// All stored records ordered by identity ascending
    ///
    /// Reads observe the store either before or after any concurrent
    /// insert, never in between.
    async fn get_all(&self) -> Result<Vec<T>, StorageError>;

    /// Release the storage resource
    ///
    /// Safe to call more than once. Later `insert`/`get_all` calls fail with
    /// `StorageError::Disposed`.
    fn dispose(&self) -> Result<(), StorageError>;
}

/// Scoped owner of a repository that guarantees disposal
///
/// Call `close` at the end of a session to observe disposal errors; any
/// other exit path (early return, `?`, unwinding) disposes on drop.
pub struct RepositoryScope<T: Entity> {
    repository: Arc<dyn Repository<T>>,
    closed: bool,
}

impl<T: Entity> RepositoryScope<T> {
    pub fn new(repository: Arc<dyn Repository<T>>) -> Self {
        Self {
            repository,
            closed: false,
        }
    }

    /// Shared handle for consumers that live inside the scope
    pub fn repository(&self) -> Arc<dyn Repository<T>> {
        Arc::clone(&self.repository)
    }

    /// Dispose now and report the outcome
    pub fn close(mut self) -> Result<(), StorageError> {
        self.closed = true;
        debug!("Closing repository scope");
        self.repository.dispose()
    }
}

impl<T: Entity> Drop for RepositoryScope<T> {
    fn drop(&mut self) {
        if self.closed {
            return;
        }

        debug!("Repository scope dropped without close, disposing");
        if let Err(e) = self.repository.dispose() {
            warn!("Failed to dispose repository: {}", e);
        }
    }
}
