//! The record data type stored on a cassette.

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

/// A single recorded interaction as an ordered mapping of named fields.
///
/// Records are opaque to the storage tier beyond the `request` field, which
/// the lookup index snapshots as per-position metadata. Typical records also
/// carry a `response` field and a `recorded_at` timestamp, but nothing here
/// validates field names or shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Mapping);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self(Mapping::new())
    }

    /// Build a record from (field name, value) pairs, preserving order.
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut mapping = Mapping::new();
        for (key, value) in pairs {
            mapping.insert(Value::String(key.into()), value);
        }
        Self(mapping)
    }

    /// Set a field, replacing any existing value under the same name.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(Value::String(key.into()), value);
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// The `request` field, if present.
    #[must_use]
    pub fn request(&self) -> Option<&Value> {
        self.field("request")
    }

    /// The `response` field, if present.
    #[must_use]
    pub fn response(&self) -> Option<&Value> {
        self.field("response")
    }

    /// Whether the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the underlying mapping.
    #[must_use]
    pub fn as_mapping(&self) -> &Mapping {
        &self.0
    }
}

impl Default for Record {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Mapping> for Record {
    fn from(mapping: Mapping) -> Self {
        Self(mapping)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Record {
        Record::from_pairs([
            ("request", Value::String("GET /health".into())),
            ("response", Value::String("200 OK".into())),
        ])
    }

    #[test]
    fn yaml_round_trip() {
        let record = sample_record();
        let yaml = serde_yaml::to_string(&record).expect("serialize");
        let deserialized: Record = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(record, deserialized);
    }

    #[test]
    fn serializes_as_transparent_mapping() {
        let yaml = serde_yaml::to_string(&sample_record()).unwrap();
        assert!(yaml.starts_with("request:"), "unexpected yaml: {yaml}");
    }

    #[test]
    fn field_order_is_preserved() {
        let record = Record::from_pairs([
            ("zeta", Value::Null),
            ("alpha", Value::Null),
            ("mid", Value::Null),
        ]);
        let keys: Vec<_> = record.as_mapping().keys().cloned().collect();
        assert_eq!(
            keys,
            vec![
                Value::String("zeta".into()),
                Value::String("alpha".into()),
                Value::String("mid".into())
            ]
        );
    }

    #[test]
    fn request_accessor_reads_the_request_field() {
        let record = sample_record();
        assert_eq!(record.request(), Some(&Value::String("GET /health".into())));
        assert_eq!(record.field("missing"), None);
    }
}
