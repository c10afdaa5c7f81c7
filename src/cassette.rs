//! Record/playback harness over a storage backend.

use chrono::Utc;
use serde_yaml::Value;

use crate::error::Result;
use crate::matcher::{self, RequestMatcher};
use crate::record::Record;
use crate::storage::Storage;

/// A named cassette tying a storage backend to a matcher set.
///
/// Recording appends a request/response record stamped with the recording
/// time; playback walks the storage protocol forward looking for a request
/// that agrees with the probe on every configured matcher.
///
/// Playback inherits the storage's forward-tape rewind semantics: each walk
/// resumes from the last advanced position rather than the start of the
/// tape, so requests replayed in recorded order from the current position
/// hit, while probing for a request behind the resume marker misses. A
/// missed probe moves the marker forward; this is the preserved behavior of
/// the storage protocol, not an accident of the harness.
#[derive(Debug)]
pub struct Cassette<S: Storage> {
    name: String,
    storage: S,
    matchers: Vec<RequestMatcher>,
}

impl<S: Storage> Cassette<S> {
    /// Create a cassette with the default matcher set (method + URL).
    pub fn new(name: impl Into<String>, storage: S) -> Self {
        Self::with_matchers(name, storage, matcher::default_matchers())
    }

    /// Create a cassette with an explicit matcher set.
    pub fn with_matchers(
        name: impl Into<String>,
        storage: S,
        matchers: Vec<RequestMatcher>,
    ) -> Self {
        Self { name: name.into(), storage, matchers }
    }

    /// The cassette's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record a request/response pair, stamping the recording time.
    ///
    /// A request that already plays back is skipped, so re-recording a
    /// session does not duplicate interactions that are still reachable on
    /// the tape.
    ///
    /// # Errors
    ///
    /// Returns an error if playback probing or the append fails.
    pub fn record(&mut self, request: Value, response: Value) -> Result<()> {
        if self.has_response(&request)? {
            return Ok(());
        }
        let record = Record::from_pairs([
            ("request", request),
            ("response", response),
            ("recorded_at", Value::String(Utc::now().to_rfc3339())),
        ]);
        self.storage.append(&record)
    }

    /// Play back the response recorded for `request`, if one is reachable.
    ///
    /// Walks the storage forward from its resume position, comparing each
    /// stored request to the probe with the configured matchers, and
    /// returns the first matching record's `response` field.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding the storage fails.
    pub fn playback(&mut self, request: &Value) -> Result<Option<Value>> {
        self.storage.rewind()?;
        while self.storage.valid()? {
            if let Some(record) = self.storage.current()? {
                if let Some(stored) = record.request() {
                    if matcher::matches_all(&self.matchers, stored, request) {
                        return Ok(record.response().cloned());
                    }
                }
            }
            self.storage.advance();
        }
        Ok(None)
    }

    /// Whether playback would yield a response for `request`.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding the storage fails.
    pub fn has_response(&mut self, request: &Value) -> Result<bool> {
        Ok(self.playback(request)?.is_some())
    }

    /// Give back the underlying storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
