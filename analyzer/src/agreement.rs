//! Set agreement: which batches were delivered everywhere, and who missed what.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use audit_types::{NodeId, NodeLog};

/// Cross-node batch agreement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetAgreement {
    /// Distinct batch ids seen on any node (the union).
    pub total_batches: usize,
    /// Distinct batch ids seen on every node (the intersection).
    pub common_batches: usize,
    /// `common_batches / total_batches * 100`, or 0 when no batches exist.
    pub consensus_rate: f64,
    /// Batches each node lacks relative to the union. Only nodes missing
    /// at least one batch appear.
    pub missing: BTreeMap<NodeId, BTreeSet<String>>,
}

impl SetAgreement {
    /// Every node delivered every batch, and at least one batch exists.
    pub fn is_full(&self) -> bool {
        self.total_batches > 0 && self.common_batches == self.total_batches
    }
}

/// Distinct batch ids a node delivered.
pub fn batch_set(log: &NodeLog) -> BTreeSet<&str> {
    log.batch_ids().collect()
}

/// Union of all batch sets.
pub fn union<'a>(sets: &BTreeMap<NodeId, BTreeSet<&'a str>>) -> BTreeSet<&'a str> {
    sets.values().flatten().copied().collect()
}

/// Intersection of all batch sets; empty when there are no sets.
pub fn intersection<'a>(sets: &BTreeMap<NodeId, BTreeSet<&'a str>>) -> BTreeSet<&'a str> {
    let mut iter = sets.values();
    let Some(first) = iter.next() else {
        return BTreeSet::new();
    };
    let mut common = first.clone();
    for set in iter {
        common.retain(|batch| set.contains(batch));
    }
    common
}

/// Percentage of the union present on every node.
pub fn consensus_rate(common: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    common as f64 / total as f64 * 100.0
}

/// Batches in `all` that `own` lacks.
pub fn missing_from(all: &BTreeSet<&str>, own: &BTreeSet<&str>) -> BTreeSet<String> {
    all.difference(own).map(|b| b.to_string()).collect()
}
