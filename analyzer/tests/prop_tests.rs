use proptest::prelude::*;

use audit_analyzer::{analyze, FULL_CONSENSUS_RATE};
use audit_types::{DeliveryRecord, DeliverySnapshot, NodeLog, Verdict};

/// Up to six nodes, each delivering up to twelve records drawn from a small
/// batch alphabet so overlap, gaps and repeats all occur.
fn cluster() -> impl Strategy<Value = Vec<(String, Vec<(u8, i64)>)>> {
    prop::collection::btree_map(
        "[a-e][0-9]",
        prop::collection::vec((0u8..8, 0i64..14), 0..12),
        1..6,
    )
    .prop_map(|nodes| nodes.into_iter().collect())
}

fn build(nodes: &[(String, Vec<(u8, i64)>)]) -> Vec<NodeLog> {
    nodes
        .iter()
        .map(|(id, records)| {
            NodeLog::new(
                id.as_str(),
                records
                    .iter()
                    .map(|(batch, seq)| DeliveryRecord::new(format!("b{batch}"), *seq))
                    .collect(),
            )
        })
        .collect()
}

proptest! {
    /// Analyzing the same snapshot twice yields identical reports.
    #[test]
    fn analysis_is_idempotent(nodes in cluster()) {
        let snapshot = DeliverySnapshot::from_logs(build(&nodes)).unwrap();
        let first = analyze(&snapshot).unwrap();
        let second = analyze(&snapshot).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    /// Insertion order never changes the report, and the reference node is
    /// always the smallest id.
    #[test]
    fn reference_choice_ignores_insertion_order(nodes in cluster()) {
        let forward = DeliverySnapshot::from_logs(build(&nodes)).unwrap();
        let mut reversed_logs = build(&nodes);
        reversed_logs.reverse();
        let reversed = DeliverySnapshot::from_logs(reversed_logs).unwrap();

        let a = analyze(&forward).unwrap();
        let b = analyze(&reversed).unwrap();
        prop_assert_eq!(&a, &b);

        let smallest = nodes.iter().map(|(id, _)| id.as_str()).min().unwrap();
        prop_assert_eq!(a.order.reference_node.as_str(), smallest);
    }

    /// The rate stays within [0, 100] and is 100 exactly when every node's
    /// batch set equals the union.
    #[test]
    fn consensus_rate_bounds(nodes in cluster()) {
        let logs = build(&nodes);
        let snapshot = DeliverySnapshot::from_logs(logs.clone()).unwrap();
        let report = analyze(&snapshot).unwrap();
        let rate = report.agreement.consensus_rate;
        prop_assert!((0.0..=100.0).contains(&rate));

        let union: std::collections::BTreeSet<&str> =
            logs.iter().flat_map(|log| log.batch_ids()).collect();
        let every_node_has_all = !union.is_empty()
            && logs.iter().all(|log| {
                log.batch_ids().collect::<std::collections::BTreeSet<_>>() == union
            });
        prop_assert_eq!(rate == FULL_CONSENSUS_RATE, every_node_has_all);
        prop_assert_eq!(report.agreement.missing.is_empty(), every_node_has_all || union.is_empty());
    }

    /// A node that is an exact prefix of the reference is never mismatched.
    #[test]
    fn prefix_of_reference_is_never_mismatched(
        batches in prop::collection::vec(0u8..20, 0..16),
        cut in 0usize..16,
    ) {
        let k = cut.min(batches.len());
        let records = |n: usize| -> Vec<DeliveryRecord> {
            batches[..n]
                .iter()
                .enumerate()
                .map(|(i, b)| DeliveryRecord::new(format!("b{b}"), i as i64 + 1))
                .collect()
        };
        let snapshot = DeliverySnapshot::from_logs([
            NodeLog::new("a-reference", records(batches.len())),
            NodeLog::new("b-behind", records(k)),
        ])
        .unwrap();
        let report = analyze(&snapshot).unwrap();
        prop_assert!(report.order.mismatches.is_empty());
        prop_assert_eq!(report.order.matching_nodes, 2);
    }

    /// Mismatch positions always fall inside the shared prefix.
    #[test]
    fn mismatches_stay_within_shared_prefix(nodes in cluster()) {
        let snapshot = DeliverySnapshot::from_logs(build(&nodes)).unwrap();
        let report = analyze(&snapshot).unwrap();
        let reference = snapshot.get(&report.order.reference_node).unwrap();
        for (node_id, mismatches) in &report.order.mismatches {
            let log = snapshot.get(node_id).unwrap();
            let bound = reference.delivery_count().min(log.delivery_count());
            prop_assert!(mismatches.iter().all(|m| m.position < bound));
            prop_assert!(mismatches.windows(2).all(|w| w[0].position < w[1].position));
        }
        prop_assert!(!report.order.mismatches.contains_key(&report.order.reference_node));
    }

    /// Duplicate count is records minus distinct batch ids.
    #[test]
    fn duplicate_count_matches_distinct(nodes in cluster()) {
        let logs = build(&nodes);
        let report = analyze(&DeliverySnapshot::from_logs(logs.clone()).unwrap()).unwrap();
        for log in &logs {
            let distinct: std::collections::HashSet<&str> = log.batch_ids().collect();
            let extra = log.delivery_count() - distinct.len();
            prop_assert_eq!(report.duplicates.get(&log.node_id).copied().unwrap_or(0), extra);
        }
    }

    /// A sequence issue is reported iff seq values differ from 1..=n, and
    /// reported missing values lie in that range.
    #[test]
    fn sequence_issue_iff_not_contiguous(nodes in cluster()) {
        let logs = build(&nodes);
        let report = analyze(&DeliverySnapshot::from_logs(logs.clone()).unwrap()).unwrap();
        for log in &logs {
            let expected: Vec<i64> = (1..=log.delivery_count() as i64).collect();
            let observed: Vec<i64> = log.seqs().collect();
            let issue = report.sequence_issues.get(&log.node_id);
            prop_assert_eq!(issue.is_some(), observed != expected);
            if let Some(issue) = issue {
                prop_assert!(issue.missing.iter().all(|m| *m >= 1 && *m <= expected.len() as i64));
                prop_assert!(issue.missing.iter().all(|m| !observed.contains(m)));
            }
        }
    }

    /// A perfect verdict implies every structural check passed.
    #[test]
    fn perfect_implies_clean(nodes in cluster()) {
        let report = analyze(&DeliverySnapshot::from_logs(build(&nodes)).unwrap()).unwrap();
        if report.verdict == Verdict::Perfect {
            prop_assert!(report.findings().is_clean());
            prop_assert!(report.agreement.is_full());
            for node_id in report.deliveries.per_node.keys() {
                prop_assert!(report.is_node_clean(node_id));
            }
        }
    }
}
