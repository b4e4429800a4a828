//! Fundamental types for the consensus audit.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! node identifiers, delivered-message records, per-node logs, the loaded
//! snapshot handed to the analyzer, and the final verdict.

pub mod error;
pub mod node;
pub mod record;
pub mod snapshot;
pub mod verdict;

pub use error::AuditError;
pub use node::{NodeId, NodeLog};
pub use record::DeliveryRecord;
pub use snapshot::DeliverySnapshot;
pub use verdict::Verdict;
