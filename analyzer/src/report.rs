//! The consensus report, the single output of an analysis run.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use audit_types::{NodeId, Verdict};
use audit_utils::CountSummary;

use crate::{OrderConsistency, SequenceIssue, SetAgreement, StructuralFindings};

/// Per-node delivery counts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeliveryCounts {
    pub per_node: BTreeMap<NodeId, usize>,
    #[serde(flatten)]
    pub summary: CountSummary,
}

/// Everything an analysis run found. Built once, never mutated.
///
/// All maps are ordered by node id, so equal inputs serialize to identical
/// bytes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConsensusReport {
    pub node_count: usize,
    pub deliveries: DeliveryCounts,
    pub agreement: SetAgreement,
    pub order: OrderConsistency,
    /// Extra deliveries per node. Only nodes with at least one appear.
    pub duplicates: BTreeMap<NodeId, usize>,
    /// Nodes whose seq values are not exactly `1..=n`.
    pub sequence_issues: BTreeMap<NodeId, SequenceIssue>,
    pub verdict: Verdict,
}

impl ConsensusReport {
    pub fn findings(&self) -> StructuralFindings {
        StructuralFindings {
            order_mismatches: !self.order.mismatches.is_empty(),
            duplicates: !self.duplicates.is_empty(),
            sequence_issues: !self.sequence_issues.is_empty(),
        }
    }

    /// Whether a node shows up in any per-node finding.
    pub fn is_node_clean(&self, node_id: &NodeId) -> bool {
        !self.agreement.missing.contains_key(node_id)
            && !self.order.mismatches.contains_key(node_id)
            && !self.duplicates.contains_key(node_id)
            && !self.sequence_issues.contains_key(node_id)
    }
}
