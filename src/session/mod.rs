/*!
 * Interactive session building blocks.
 *
 * This module provides:
 * - Operator input validation into an `ArgumentPair`
 * - Menu key decoding into a `MenuAction`
 */

pub mod arguments;
pub mod menu;

// Re-export main types
pub use arguments::{ArgumentPair, MAX_ARGUMENT_LENGTH};
pub use menu::MenuAction;
