/*!
 * # argstash - keep and combine argument pairs
 *
 * A Rust library and terminal tool that captures pairs of text arguments,
 * persists them, lists the history, and combines the current pair.
 *
 * ## Features
 *
 * - Validate operator input (exactly two arguments, 1 to 50 characters each)
 * - Persist pairs with store-assigned ascending ids in one of:
 *   - process memory
 *   - a JSON-lines file
 *   - a SQLite database
 * - Combine a pair: numeric sum when both are numbers, concatenation otherwise
 * - Scoped disposal of the store on every exit path
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `database`: The `Repository` trait, its backends and `RepositoryScope`
 * - `combiner`: The pure combination of two arguments
 * - `session`: Input validation and menu decoding
 * - `app_controller`: The interactive menu loop
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod combiner;
pub mod database;
pub mod errors;
pub mod session;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use combiner::{CombinePolicy, Combiner};
pub use database::{open_repository, ArgumentsRecord, NewArguments, RecordId, Repository, RepositoryScope};
pub use errors::{AppError, StorageError, ValidationError};
pub use session::ArgumentPair;
