//! Top-level error type shared across crates.

use thiserror::Error;

use crate::NodeId;

/// Common error type for the audit data model.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("node {0} appears more than once in the snapshot")]
    DuplicateNode(NodeId),

    #[error("malformed delivery record: {0}")]
    MalformedRecord(#[from] serde_json::Error),
}
