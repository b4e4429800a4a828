//! Order consistency: prefix comparison of each node against a reference node.
//!
//! This is a positional check, not an alignment. A node that missed one
//! message is shifted by one from that point on and every later compared
//! position counts as a divergence. Positions past the shorter of the two
//! streams are never compared, so a node that is merely behind is not
//! penalised.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use audit_types::{NodeId, NodeLog};

/// A position where a node's delivery order differs from the reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderMismatch {
    /// Zero-based index into both delivery streams.
    pub position: usize,
    /// Batch the reference node delivered at this position.
    pub expected: String,
    /// Batch this node delivered at this position.
    pub actual: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderConsistency {
    /// Lexically smallest node id; its delivery order is the reference.
    pub reference_node: NodeId,
    /// Nodes (reference included) with no divergence in the shared prefix.
    pub matching_nodes: usize,
    /// Divergences per node. Only nodes with at least one appear.
    pub mismatches: BTreeMap<NodeId, Vec<OrderMismatch>>,
}

impl OrderConsistency {
    pub fn all_match(&self) -> bool {
        self.mismatches.is_empty()
    }
}

/// Compare `log` position by position against `reference`, up to the
/// shorter of the two lengths.
pub fn order_mismatches(reference: &[&str], log: &NodeLog) -> Vec<OrderMismatch> {
    reference
        .iter()
        .zip(log.batch_ids())
        .enumerate()
        .filter(|(_, (expected, actual))| *expected != actual)
        .map(|(position, (expected, actual))| OrderMismatch {
            position,
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
        .collect()
}
