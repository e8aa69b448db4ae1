/*!
 * Validation of operator input into an argument pair.
 */

use crate::database::models::NewArguments;
use crate::errors::ValidationError;

/// Longest argument the stores accept, in characters
pub const MAX_ARGUMENT_LENGTH: usize = 50;

/// Two validated arguments: non-empty and no longer than the session limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentPair {
    first: String,
    second: String,
}

impl ArgumentPair {
    /// Parse a line holding two arguments separated by one whitespace character
    ///
    /// Each chunk is trimmed. Runs of whitespace produce empty chunks and
    /// therefore count as extra arguments.
    pub fn parse(input: &str, max_length: usize) -> Result<Self, ValidationError> {
        let line = input.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(ValidationError::WrongArgumentCount { found: 0 });
        }

        let chunks: Vec<&str> = line.split(char::is_whitespace).map(str::trim).collect();
        match chunks.as_slice() {
            [first, second] => Self::from_parts(first, second, max_length),
            _ => Err(ValidationError::WrongArgumentCount {
                found: chunks.len(),
            }),
        }
    }

    /// Validate two separately supplied arguments
    pub fn from_parts(
        first: &str,
        second: &str,
        max_length: usize,
    ) -> Result<Self, ValidationError> {
        for (position, value) in [(1, first), (2, second)] {
            if value.is_empty() {
                return Err(ValidationError::EmptyArgument { position });
            }

            let length = value.chars().count();
            if length > max_length {
                return Err(ValidationError::ArgumentTooLong {
                    position,
                    length,
                    max: max_length,
                });
            }
        }

        Ok(Self {
            first: first.to_string(),
            second: second.to_string(),
        })
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }

    /// Draft for the record store
    pub fn to_new_arguments(&self) -> NewArguments {
        NewArguments::new(self.first.clone(), self.second.clone())
    }
}
