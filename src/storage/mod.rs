//! Storage backends for cassette records.
//!
//! [`Storage`] is the seam between the engine and the harness: append plus a
//! forward-with-rewind iteration protocol. [`YamlStorage`] is the real
//! engine; [`Blackhole`] discards everything for record-nothing
//! configurations.

pub mod blackhole;
pub mod index;
pub mod scan;
pub mod yaml;

pub use blackhole::Blackhole;
pub use yaml::YamlStorage;

use crate::error::Result;
use crate::record::Record;

/// Sequential, append-only record storage with external iteration.
///
/// One instance exclusively owns one backing resource for its lifetime;
/// concurrent use of the same cassette file must be serialized externally.
pub trait Storage {
    /// Append a record at the end of the store, flushing durably before
    /// returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing file cannot be written. After a
    /// failed append the store may be corrupted and must not be used.
    fn append(&mut self, record: &Record) -> Result<()>;

    /// Whether the cursor points at a stored record.
    ///
    /// # Errors
    ///
    /// Returns an error if building the lookup index fails.
    fn valid(&mut self) -> Result<bool>;

    /// The record at the cursor, or `None` when the cursor is past the end
    /// or the stored text decodes to nothing.
    ///
    /// # Errors
    ///
    /// Returns an error on I/O failure or malformed stored text.
    fn current(&mut self) -> Result<Option<Record>>;

    /// Advance the cursor by one position.
    fn advance(&mut self);

    /// Reset scan state to the start of the file and restore the cursor to
    /// the resume marker (see [`YamlStorage::rewind`] for the exact
    /// semantics).
    ///
    /// # Errors
    ///
    /// Returns an error if seeking the backing file fails.
    fn rewind(&mut self) -> Result<()>;
}
