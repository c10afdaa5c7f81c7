//! Error types for tapedeck.
//!
//! Provides a unified error type for all storage and cassette operations.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for tapedeck operations.
///
/// Absence of a record is never an error; storage lookups signal it with
/// `Ok(None)`. A failed append may leave the cassette file without its
/// trailing newline, so callers must treat the store as unusable after an
/// append returns `Err`.
#[derive(Debug, Error)]
pub enum Error {
    /// File unreadable, unwritable, or unseekable. Not retried; surfaced
    /// synchronously to the caller of the failing operation.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed YAML in the cassette file. Propagated unmodified; an index
    /// build hitting this aborts without exposing a partial index.
    #[error("codec error: {0}")]
    Codec(#[from] serde_yaml::Error),
}
