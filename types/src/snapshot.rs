//! The immutable set of node logs handed to the analyzer.

use std::collections::BTreeMap;

use crate::{AuditError, NodeId, NodeLog};

/// Every loaded node log, keyed by node id.
///
/// Backed by an ordered map so iteration is always in lexical node order,
/// whatever order the logs were inserted in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeliverySnapshot {
    nodes: BTreeMap<NodeId, NodeLog>,
}

impl DeliverySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node's log. A node id may only be added once.
    pub fn insert(&mut self, log: NodeLog) -> Result<(), AuditError> {
        if self.nodes.contains_key(&log.node_id) {
            return Err(AuditError::DuplicateNode(log.node_id));
        }
        self.nodes.insert(log.node_id.clone(), log);
        Ok(())
    }

    /// Build a snapshot from logs, rejecting repeated node ids.
    pub fn from_logs(logs: impl IntoIterator<Item = NodeLog>) -> Result<Self, AuditError> {
        let mut snapshot = Self::new();
        for log in logs {
            snapshot.insert(log)?;
        }
        Ok(snapshot)
    }

    pub fn get(&self, node_id: &NodeId) -> Option<&NodeLog> {
        self.nodes.get(node_id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in lexical order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    pub fn as_map(&self) -> &BTreeMap<NodeId, NodeLog> {
        &self.nodes
    }
}
