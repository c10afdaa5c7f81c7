//! The YAML-backed record store.

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::record::Record;
use crate::storage::index::{IndexEntry, RecordIndex};
use crate::storage::scan::{read_next_record, ScanState};
use crate::storage::Storage;

/// Append-only record store over a YAML-list cassette file.
///
/// Owns the open file, its seek position, the scan state, the cursor, and a
/// lazily built byte-offset index. The index is torn down on every append
/// and rebuilt by one full scan on the next protocol call, so reads between
/// mutations amortize to a direct seek per record and memory stays bounded
/// by the largest single record.
///
/// A non-empty cassette file always ends with exactly one trailing newline;
/// every append preserves this by overwriting the trailing newline with a
/// newline plus the newline-terminated YAML block of the new record.
#[derive(Debug)]
pub struct YamlStorage {
    path: PathBuf,
    reader: BufReader<File>,
    scan: ScanState,
    index: Option<RecordIndex>,
    cursor: usize,
    resume: usize,
}

impl YamlStorage {
    /// Open a cassette file, creating it empty if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for reading and
    /// writing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().read(true).write(true).create(true).open(&path)?;
        debug!(path = %path.display(), "opened cassette");
        Ok(Self {
            path,
            reader: BufReader::new(file),
            scan: ScanState::default(),
            index: None,
            cursor: 0,
            resume: 0,
        })
    }

    /// Path of the backing cassette file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of complete records currently stored.
    ///
    /// # Errors
    ///
    /// Returns an error if building the lookup index fails.
    pub fn len(&mut self) -> Result<usize> {
        self.ensure_indexed()?;
        Ok(self.index.as_ref().map_or(0, RecordIndex::len))
    }

    /// Whether the store holds no complete records.
    ///
    /// # Errors
    ///
    /// Returns an error if building the lookup index fails.
    pub fn is_empty(&mut self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The cursor's current 0-based position.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Build the lookup index if it is unbuilt: one full scan from the start
    /// of the file, recording each record's start offset and its `request`
    /// field, then restoring the position to the file start. Idempotent once
    /// built.
    ///
    /// A failure mid-scan aborts the build entirely and the index stays
    /// unbuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the scan's I/O fails or a scanned record holds
    /// malformed YAML.
    pub fn ensure_indexed(&mut self) -> Result<()> {
        if self.index.is_some() {
            return Ok(());
        }

        self.reader.seek(SeekFrom::Start(0))?;
        self.scan.reset();

        let mut entries = Vec::new();
        loop {
            let text = read_next_record(&mut self.reader, &mut self.scan, None)?;
            if text.is_empty() {
                break;
            }
            let records: Vec<Record> = serde_yaml::from_str(&text)?;
            let request =
                records.first().and_then(|record| record.request().cloned());
            entries.push(IndexEntry { request, offset: self.scan.record_start });
        }

        self.reader.seek(SeekFrom::Start(0))?;
        self.scan.reset();

        debug!(records = entries.len(), "built cassette index");
        self.index = Some(RecordIndex::new(entries));
        Ok(())
    }
}

impl Storage for YamlStorage {
    /// Append `record` as a single-element YAML list block.
    ///
    /// The write lands at (end of file − 1 byte), clamped to 0 for an empty
    /// file, and is preceded by a newline: the new content overwrites the
    /// single trailing newline and itself ends with one, so the trailing
    /// newline invariant holds. The write is synced to disk and the lookup
    /// index is invalidated before returning. A cassette built purely by
    /// appends from empty therefore begins with one blank line.
    fn append(&mut self, record: &Record) -> Result<()> {
        let text = serde_yaml::to_string(&[record])?;

        let file = self.reader.get_mut();
        let len = file.seek(SeekFrom::End(0))?;
        file.seek(SeekFrom::Start(len.saturating_sub(1)))?;
        file.write_all(b"\n")?;
        file.write_all(text.as_bytes())?;
        file.sync_data()?;

        debug!(path = %self.path.display(), bytes = text.len(), "appended record");
        self.index = None;
        self.reader.seek(SeekFrom::Start(0))?;
        self.scan.reset();
        Ok(())
    }

    fn valid(&mut self) -> Result<bool> {
        self.ensure_indexed()?;
        Ok(self.index.as_ref().and_then(|index| index.get(self.cursor)).is_some())
    }

    fn current(&mut self) -> Result<Option<Record>> {
        self.ensure_indexed()?;
        let Some(offset) =
            self.index.as_ref().and_then(|index| index.get(self.cursor)).map(|e| e.offset)
        else {
            return Ok(None);
        };

        let text = read_next_record(&mut self.reader, &mut self.scan, Some(offset))?;
        let mut records: Vec<Record> = serde_yaml::from_str(&text)?;
        if records.is_empty() {
            Ok(None)
        } else {
            Ok(Some(records.remove(0)))
        }
    }

    fn advance(&mut self) {
        self.cursor += 1;
        self.resume = self.cursor;
    }

    /// Reset scan state to the file start and set the cursor to the resume
    /// marker.
    ///
    /// The resume marker is the last cursor value set by [`advance`], not 0:
    /// after exhausting an iteration, `rewind` leaves the cursor past the
    /// end and `valid` stays false. This forward-tape behavior is load
    /// bearing for playback (replaying requests in recorded order never
    /// rescans matched positions) and is kept deliberately.
    ///
    /// [`advance`]: Storage::advance
    fn rewind(&mut self) -> Result<()> {
        self.reader.seek(SeekFrom::Start(0))?;
        self.scan.reset();
        self.cursor = self.resume;
        Ok(())
    }
}
