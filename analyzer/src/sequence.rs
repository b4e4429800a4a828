//! Sequence-number integrity of a single node's stream.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use audit_types::NodeLog;

/// A node whose `seq` values, in delivery order, are not exactly `1..=n`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceIssue {
    /// First delivery index whose `seq` is not `index + 1`.
    pub first_divergence: usize,
    /// Integers in `1..=n` that no record carries, ascending. May be empty
    /// when the values are merely out of order.
    pub missing: Vec<i64>,
}

/// Check that `log`'s seq values equal `[1, 2, ..., len]` position by position.
///
/// Returns `None` when they do, including for an empty log.
pub fn check_sequence(log: &NodeLog) -> Option<SequenceIssue> {
    let first_divergence = log
        .seqs()
        .enumerate()
        .position(|(idx, seq)| seq != idx as i64 + 1)?;

    let observed: HashSet<i64> = log.seqs().collect();
    let missing = (1..=log.delivery_count() as i64)
        .filter(|expected| !observed.contains(expected))
        .collect();

    Some(SequenceIssue {
        first_divergence,
        missing,
    })
}
