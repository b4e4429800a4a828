//! The analysis pass.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use rayon::prelude::*;

use audit_types::{DeliverySnapshot, NodeId};
use audit_utils::{format_elapsed, CountSummary};

use crate::agreement::{self, SetAgreement};
use crate::duplicates::duplicate_count;
use crate::order::{order_mismatches, OrderConsistency, OrderMismatch};
use crate::sequence::{check_sequence, SequenceIssue};
use crate::verdict::{classify, StructuralFindings};
use crate::{AnalyzeError, ConsensusReport, DeliveryCounts};

/// Findings that need nothing but the node's own stream.
struct LocalScan<'a> {
    batches: BTreeSet<&'a str>,
    duplicates: usize,
    sequence: Option<SequenceIssue>,
}

/// Findings relative to the shared union and reference order.
struct CrossScan {
    missing: BTreeSet<String>,
    mismatches: Vec<OrderMismatch>,
}

/// Analyze a snapshot of node logs.
///
/// Runs in two data-parallel passes over the nodes. The first computes each
/// node's batch set, duplicate count and sequence integrity. After the union
/// and intersection are merged, the second computes missing batches and
/// order divergences against the reference node.
pub fn analyze(snapshot: &DeliverySnapshot) -> Result<ConsensusReport, AnalyzeError> {
    let started = Instant::now();

    let reference_node = snapshot
        .node_ids()
        .min()
        .cloned()
        .ok_or(AnalyzeError::EmptyInput)?;
    let reference_order: Vec<&str> = snapshot
        .get(&reference_node)
        .map(|log| log.batch_ids().collect())
        .unwrap_or_default();

    let nodes = snapshot.as_map();

    let local: BTreeMap<&NodeId, LocalScan<'_>> = nodes
        .par_iter()
        .map(|(node_id, log)| {
            let scan = LocalScan {
                batches: agreement::batch_set(log),
                duplicates: duplicate_count(log),
                sequence: check_sequence(log),
            };
            (node_id, scan)
        })
        .collect();

    let batch_sets: BTreeMap<NodeId, BTreeSet<&str>> = local
        .iter()
        .map(|(node_id, scan)| ((*node_id).clone(), scan.batches.clone()))
        .collect();
    let all_batches = agreement::union(&batch_sets);
    let common_batches = agreement::intersection(&batch_sets);

    let cross: BTreeMap<&NodeId, CrossScan> = nodes
        .par_iter()
        .map(|(node_id, log)| {
            let scan = CrossScan {
                missing: agreement::missing_from(&all_batches, &batch_sets[node_id]),
                mismatches: order_mismatches(&reference_order, log),
            };
            (node_id, scan)
        })
        .collect();

    let per_node: BTreeMap<NodeId, usize> = nodes
        .iter()
        .map(|(node_id, log)| (node_id.clone(), log.delivery_count()))
        .collect();
    let summary = CountSummary::from_counts(per_node.values().copied());

    let mut missing = BTreeMap::new();
    let mut mismatches = BTreeMap::new();
    for (node_id, scan) in cross {
        if !scan.missing.is_empty() {
            missing.insert(node_id.clone(), scan.missing);
        }
        if !scan.mismatches.is_empty() {
            mismatches.insert(node_id.clone(), scan.mismatches);
        }
    }

    let mut duplicates = BTreeMap::new();
    let mut sequence_issues = BTreeMap::new();
    for (node_id, scan) in local {
        if scan.duplicates > 0 {
            duplicates.insert(node_id.clone(), scan.duplicates);
        }
        if let Some(issue) = scan.sequence {
            sequence_issues.insert(node_id.clone(), issue);
        }
    }

    let findings = StructuralFindings {
        order_mismatches: !mismatches.is_empty(),
        duplicates: !duplicates.is_empty(),
        sequence_issues: !sequence_issues.is_empty(),
    };
    let agreement = SetAgreement {
        total_batches: all_batches.len(),
        common_batches: common_batches.len(),
        consensus_rate: agreement::consensus_rate(common_batches.len(), all_batches.len()),
        missing,
    };
    let verdict = classify(&agreement, &findings);

    let report = ConsensusReport {
        node_count: nodes.len(),
        deliveries: DeliveryCounts { per_node, summary },
        agreement,
        order: OrderConsistency {
            reference_node,
            matching_nodes: nodes.len() - mismatches.len(),
            mismatches,
        },
        duplicates,
        sequence_issues,
        verdict,
    };

    tracing::debug!(
        nodes = report.node_count,
        batches = report.agreement.total_batches,
        verdict = %report.verdict,
        elapsed = %format_elapsed(started.elapsed()),
        "consensus analysis complete"
    );

    Ok(report)
}
