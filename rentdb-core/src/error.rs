//! Error and result types for store operations.
//!
//! The store is purely in-memory, so there is no I/O error class. Use
//! [`StoreResult<T>`] as the return type for fallible operations.

use regex::Error as RegexError;
use thiserror::Error;

/// Represents all possible errors raised by the document store.
///
/// An unmatched filter is never an error; it is reported as `None`, an
/// empty result set, or a zero count by the operation itself.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The filter document uses an unsupported operator or an operand of
    /// the wrong shape. Malformed filters are always rejected rather than
    /// treated as non-matching clauses.
    #[error("invalid filter: {0}")]
    InvalidFilter(String),
    /// A `$regex` pattern failed to compile. The failure aborts the whole
    /// operation instead of being swallowed as a non-match.
    #[error("invalid regex pattern: {0}")]
    InvalidRegex(String),
    /// The named collection is not part of the database schema.
    #[error("collection not found: {0}")]
    CollectionNotFound(String),
}

/// A specialized `Result` type for document store operations.
pub type StoreResult<T> = Result<T, StoreError>;

impl From<RegexError> for StoreError {
    fn from(err: RegexError) -> Self {
        StoreError::InvalidRegex(err.to_string())
    }
}
