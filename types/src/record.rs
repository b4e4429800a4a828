//! A single delivered-message record, one per line of a node's log.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::AuditError;

/// One message a node recorded as delivered.
///
/// Only `batch_id` and `seq` carry meaning for the audit. Everything else the
/// node wrote (`creator`, `merkle_root`, `delivered_at`, payloads, ...) is kept
/// verbatim in `extra` so records survive a round-trip unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryRecord {
    /// Opaque batch identifier, unique per message content.
    pub batch_id: String,
    /// Node-local sequence number, expected to run 1, 2, 3, ...
    pub seq: i64,
    /// Fields not interpreted by the audit.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DeliveryRecord {
    pub fn new(batch_id: impl Into<String>, seq: i64) -> Self {
        Self {
            batch_id: batch_id.into(),
            seq,
            extra: Map::new(),
        }
    }

    /// Parse one JSON line as written by the node's delivery logger.
    ///
    /// Surrounding whitespace is ignored. The line must be a JSON object with a
    /// string `batch_id` and an integer `seq`.
    pub fn from_json_line(line: &str) -> Result<Self, AuditError> {
        Ok(serde_json::from_str(line.trim())?)
    }

    /// Look up a passthrough field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}
