//! Lazily built byte-offset index over a cassette file.

use serde_yaml::Value;

/// One indexed record: a snapshot of its `request` field plus the byte
/// offset of its marker line.
#[derive(Debug, Clone)]
pub struct IndexEntry {
    /// The record's `request` field at build time, or `None` when absent.
    pub request: Option<Value>,
    /// Byte offset of the first byte of the record's marker line.
    pub offset: u64,
}

/// Ordered position → byte-offset index, one entry per complete record.
///
/// Built by one full linear scan, at most once per append; positional lookup
/// is O(1). The store holds this as `Option<RecordIndex>`: `None` is the
/// UNBUILT state, and a failed build leaves it `None` so no partial index is
/// ever visible.
#[derive(Debug, Clone, Default)]
pub struct RecordIndex {
    entries: Vec<IndexEntry>,
}

impl RecordIndex {
    /// Wrap a completed build pass. Entries must be in file order.
    #[must_use]
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        debug_assert!(
            entries.windows(2).all(|pair| pair[0].offset < pair[1].offset),
            "index offsets must be strictly increasing"
        );
        Self { entries }
    }

    /// The entry at `position`, if one exists.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&IndexEntry> {
        self.entries.get(position)
    }

    /// Number of indexed records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the file held no complete records at build time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in file order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter()
    }
}
