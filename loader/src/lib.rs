//! Log loader.
//!
//! Expects one directory per node under a log root, each holding the node's
//! delivery log (`delivered.jsonl` by default) with one JSON record per line
//! in delivery order. Malformed lines and nodes without a log are skipped
//! and reported; they never abort the load.

pub mod error;
pub mod loader;
pub mod parse;
pub mod summary;

pub use error::LoaderError;
pub use loader::{LoadOutcome, LogLoader, DEFAULT_DELIVERED_FILE};
pub use parse::{parse_records, ParsedRecords};
pub use summary::{LoadSummary, MalformedLine, SkipReason, SkippedNode};
