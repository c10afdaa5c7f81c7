//! Storage that records nothing.

use crate::error::Result;
use crate::record::Record;
use crate::storage::Storage;

/// A storage backend that accepts appends and discards them.
///
/// Never valid and never yields a record; used when a harness should run
/// without persisting or replaying anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Blackhole;

impl Blackhole {
    /// Create a blackhole storage.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Storage for Blackhole {
    fn append(&mut self, _record: &Record) -> Result<()> {
        Ok(())
    }

    fn valid(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn current(&mut self) -> Result<Option<Record>> {
        Ok(None)
    }

    fn advance(&mut self) {}

    fn rewind(&mut self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    #[test]
    fn discards_everything() {
        let mut storage = Blackhole::new();
        let record =
            Record::from_pairs([("request", Value::String("GET /dropped".into()))]);

        storage.append(&record).unwrap();
        storage.rewind().unwrap();
        assert!(!storage.valid().unwrap());
        assert!(storage.current().unwrap().is_none());
        storage.advance();
        assert!(!storage.valid().unwrap());
    }
}
