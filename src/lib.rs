//! tapedeck: an append-only cassette store for recorded interactions.
//!
//! Records (request/response mappings) are persisted as a human-readable
//! YAML list and read back through a forward iteration cursor. A lazily
//! built byte-offset index lets previously visited records be re-read by
//! direct seek instead of a full re-parse, and is invalidated on every
//! append. On top of the storage engine sits a thin record/playback harness
//! ([`Cassette`]) with configurable request matching.
//!
//! The engine is single-threaded and synchronous: one [`YamlStorage`]
//! exclusively owns one open cassette file, its seek position, the index,
//! and the cursor. Concurrent use of one cassette file is unsupported.

pub mod cassette;
pub mod error;
pub mod matcher;
pub mod record;
pub mod storage;

pub use cassette::Cassette;
pub use error::{Error, Result};
pub use matcher::RequestMatcher;
pub use record::Record;
pub use storage::{Blackhole, Storage, YamlStorage};
