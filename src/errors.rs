/*!
 * Error types for the argstash application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when reading from or writing to a record store
#[derive(Error, Debug)]
pub enum StorageError {
    /// The backing file could not be opened, read or written
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The SQLite engine rejected an operation
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A record could not be serialized or deserialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored data does not match the expected layout
    #[error("Corrupted storage at line {line}: {message}")]
    Corrupted {
        /// 1-based line (or row) where the problem was detected
        line: usize,
        /// What was wrong with it
        message: String,
    },

    /// The store was already disposed
    #[error("Storage has been disposed")]
    Disposed,

    /// A lock guarding the store was poisoned by a panicking holder
    #[error("Failed to acquire storage lock: {0}")]
    LockPoisoned(String),

    /// A blocking storage task failed to complete
    #[error("Storage task failed: {0}")]
    TaskFailed(String),
}

/// Errors produced while validating operator input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The input did not split into exactly two arguments
    #[error("there should be 2 arguments separated by a whitespace character (got {found})")]
    WrongArgumentCount {
        /// Number of chunks found in the input
        found: usize,
    },

    /// The input line is not valid UTF-8
    #[error("input is not valid UTF-8 text")]
    InvalidEncoding,

    /// One of the arguments is empty after trimming
    #[error("argument {position} is empty")]
    EmptyArgument {
        /// 1-based argument position
        position: usize,
    },

    /// One of the arguments exceeds the configured maximum length
    #[error("argument length shouldn't exceed the maximum length ({max}), argument {position} has {length} characters")]
    ArgumentTooLong {
        /// 1-based argument position
        position: usize,
        /// Actual length in characters
        length: usize,
        /// Maximum allowed length in characters
        max: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from the record store
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Error from input validation
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error writing to the terminal
    #[error("Console error: {0}")]
    Console(String),
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::Console(error.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(error: std::sync::PoisonError<T>) -> Self {
        Self::LockPoisoned(error.to_string())
    }
}

impl From<tokio::task::JoinError> for StorageError {
    fn from(error: tokio::task::JoinError) -> Self {
        Self::TaskFailed(error.to_string())
    }
}
