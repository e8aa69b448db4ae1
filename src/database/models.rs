/*!
 * Database entity models and DTOs.
 *
 * These structures map directly to stored records and provide
 * type-safe access to persisted data.
 */

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity assigned by a store at insertion time
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Identity handed out for the first record of an empty store
    pub const FIRST: RecordId = RecordId(1);

    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// The identity that follows this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value that a store can persist and hand an identity to
///
/// `Draft` is the identity-less form accepted by `Repository::insert`.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Identity-less form of the entity
    type Draft: Send + 'static;

    /// Assemble a stored entity from its assigned identity and draft
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Identity assigned by the store
    fn id(&self) -> RecordId;
}

/// Argument pair waiting to be persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArguments {
    /// First argument
    pub arg1: String,
    /// Second argument
    pub arg2: String,
}

impl NewArguments {
    pub fn new(arg1: impl Into<String>, arg2: impl Into<String>) -> Self {
        Self {
            arg1: arg1.into(),
            arg2: arg2.into(),
        }
    }
}

/// Persisted argument pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentsRecord {
    /// Store-assigned identity
    pub id: RecordId,
    /// First argument
    pub arg1: String,
    /// Second argument
    pub arg2: String,
}

impl Entity for ArgumentsRecord {
    type Draft = NewArguments;

    fn from_draft(id: RecordId, draft: NewArguments) -> Self {
        Self {
            id,
            arg1: draft.arg1,
            arg2: draft.arg2,
        }
    }

    fn id(&self) -> RecordId {
        self.id
    }
}

impl fmt::Display for ArgumentsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}) Arg1 = {}; Arg2 = {}", self.id, self.arg1, self.arg2)
    }
}
