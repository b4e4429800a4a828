//! Folding the individual findings into one verdict.

use audit_types::Verdict;

use crate::SetAgreement;

/// Consensus rate at which every batch reached every node.
pub const FULL_CONSENSUS_RATE: f64 = 100.0;

/// Minimum consensus rate for a [`Verdict::Strong`] classification.
pub const STRONG_CONSENSUS_RATE: f64 = 95.0;

/// Which per-node structural checks found anything on any node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StructuralFindings {
    pub order_mismatches: bool,
    pub duplicates: bool,
    pub sequence_issues: bool,
}

impl StructuralFindings {
    pub fn is_clean(&self) -> bool {
        !(self.order_mismatches || self.duplicates || self.sequence_issues)
    }
}

/// Classify a run. First match wins:
///
/// 1. `Perfect`: full set agreement and no structural findings.
/// 2. `Strong`: consensus rate of at least [`STRONG_CONSENSUS_RATE`]. Order,
///    duplicate and sequence findings are not consulted here.
/// 3. `Partial`: everything else.
pub fn classify(agreement: &SetAgreement, findings: &StructuralFindings) -> Verdict {
    if agreement.is_full() && findings.is_clean() {
        Verdict::Perfect
    } else if agreement.consensus_rate >= STRONG_CONSENSUS_RATE {
        Verdict::Strong
    } else {
        Verdict::Partial
    }
}
