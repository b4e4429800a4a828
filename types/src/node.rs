//! Node identity and a node's delivery evidence.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DeliveryRecord;

/// Identifier of a node, taken from its log directory name.
///
/// Ordering is lexical on the raw string; the analyzer relies on this to
/// pick its reference node.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// One node's records in local delivery order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeLog {
    pub node_id: NodeId,
    pub records: Vec<DeliveryRecord>,
}

impl NodeLog {
    pub fn new(node_id: impl Into<NodeId>, records: Vec<DeliveryRecord>) -> Self {
        Self {
            node_id: node_id.into(),
            records,
        }
    }

    /// Number of delivered records, duplicates included.
    pub fn delivery_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Batch ids in delivery order.
    pub fn batch_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.batch_id.as_str())
    }

    /// Sequence numbers in delivery order.
    pub fn seqs(&self) -> impl Iterator<Item = i64> + '_ {
        self.records.iter().map(|r| r.seq)
    }
}
