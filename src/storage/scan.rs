//! Raw record scanning over a cassette file.
//!
//! The scanner reads the next whole serialized record starting at a given
//! byte offset, one line at a time. A record opens at a line whose first byte
//! is the list-item marker `-`; nested YAML sequence items are indented and
//! never start at column zero, so only top-level elements open records. When
//! the marker line of the following record is read, it is un-consumed by
//! seeking backward exactly its byte length, leaving the file position on
//! that record's first byte.
//!
//! Memory use is bounded by one record's text plus one line plus the fixed
//! read buffer, independent of file size.

use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};

use tracing::trace;

/// Transient scan state tied to one open cassette file.
///
/// Valid only within one scan/read call or one index-build pass; owned
/// exclusively by a single store instance and never shared.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanState {
    /// Byte offset the next read will consume from. Must match the reader's
    /// actual position when a scan starts.
    pub position: u64,
    /// Set once a scan has read past the last byte of the file.
    pub eof: bool,
    /// Offset of the marker line that opened the most recent record.
    pub record_start: u64,
}

impl ScanState {
    /// Reset to the start of the file.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Whether a raw line opens a new top-level list element.
fn is_marker_line(line: &[u8]) -> bool {
    line.first() == Some(&b'-')
}

/// Read the next whole record starting at `from` (or at the current scan
/// position when `None`), returning its exact text.
///
/// On return the reader is positioned immediately after the record, on the
/// next record's marker line or at end of file. Starting mid-record skips
/// forward to the next marker line; starting exactly at a marker line yields
/// that record; starting at end of file yields empty text and sets the EOF
/// flag. An empty file yields empty text immediately.
///
/// # Errors
///
/// Returns an error if reading or seeking the underlying file fails.
pub fn read_next_record(
    reader: &mut BufReader<File>,
    scan: &mut ScanState,
    from: Option<u64>,
) -> std::io::Result<String> {
    if let Some(offset) = from {
        reader.seek(SeekFrom::Start(offset))?;
        scan.position = offset;
        scan.eof = false;
    }

    let mut record: Vec<u8> = Vec::new();
    let mut line: Vec<u8> = Vec::new();
    let mut in_record = false;

    loop {
        line.clear();
        let consumed = reader.read_until(b'\n', &mut line)?;
        if consumed == 0 {
            scan.eof = true;
            break;
        }

        if is_marker_line(&line) {
            if in_record {
                // Next record's boundary: un-consume its marker line so the
                // reader stays positioned on its first byte.
                reader.seek_relative(-(consumed as i64))?;
                break;
            }
            in_record = true;
            scan.record_start = scan.position;
        }

        scan.position += consumed as u64;
        if in_record {
            record.extend_from_slice(&line);
        }
    }

    trace!(
        start = scan.record_start,
        end = scan.position,
        eof = scan.eof,
        bytes = record.len(),
        "scanned record"
    );
    Ok(String::from_utf8_lossy(&record).into_owned())
}
