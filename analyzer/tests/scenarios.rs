//! End-to-end verdict scenarios over small, hand-built clusters.

use audit_analyzer::{analyze, OrderMismatch};
use audit_types::{DeliveryRecord, DeliverySnapshot, NodeId, NodeLog, Verdict};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A node whose seq counter runs 1..=n over `batches`.
fn node(id: &str, batches: &[&str]) -> NodeLog {
    NodeLog::new(
        id,
        batches
            .iter()
            .enumerate()
            .map(|(i, b)| DeliveryRecord::new(*b, i as i64 + 1))
            .collect(),
    )
}

fn snapshot(nodes: Vec<NodeLog>) -> DeliverySnapshot {
    DeliverySnapshot::from_logs(nodes).unwrap()
}

fn id(s: &str) -> NodeId {
    NodeId::from(s)
}

// ---------------------------------------------------------------------------
// Verdicts
// ---------------------------------------------------------------------------

#[test]
fn identical_nodes_are_perfect() {
    let report = analyze(&snapshot(vec![
        node("A", &["b1", "b2", "b3"]),
        node("B", &["b1", "b2", "b3"]),
        node("C", &["b1", "b2", "b3"]),
    ]))
    .unwrap();

    assert_eq!(report.agreement.consensus_rate, 100.0);
    assert!(report.order.mismatches.is_empty());
    assert_eq!(report.order.matching_nodes, 3);
    assert!(report.duplicates.is_empty());
    assert!(report.sequence_issues.is_empty());
    assert_eq!(report.verdict, Verdict::Perfect);
}

#[test]
fn node_missing_a_batch_is_partial() {
    let report = analyze(&snapshot(vec![
        node("A", &["b1", "b2", "b3"]),
        node("B", &["b1", "b2", "b3"]),
        node("C", &["b1", "b2"]),
    ]))
    .unwrap();

    assert_eq!(report.agreement.total_batches, 3);
    assert_eq!(report.agreement.common_batches, 2);
    assert!((report.agreement.consensus_rate - 66.7).abs() < 0.05);
    assert_eq!(report.agreement.missing.len(), 1);
    assert!(report.agreement.missing[&id("C")].contains("b3"));
    // C is a strict prefix of the reference, so its order is fine.
    assert!(report.order.mismatches.is_empty());
    assert_eq!(report.verdict, Verdict::Partial);
}

#[test]
fn reordered_node_is_strong() {
    let report = analyze(&snapshot(vec![
        node("A", &["b1", "b2", "b3"]),
        node("B", &["b1", "b3", "b2"]),
        node("C", &["b1", "b2", "b3"]),
    ]))
    .unwrap();

    assert_eq!(report.agreement.consensus_rate, 100.0);
    assert_eq!(report.order.reference_node, id("A"));
    assert_eq!(
        report.order.mismatches[&id("B")],
        vec![
            OrderMismatch {
                position: 1,
                expected: "b2".into(),
                actual: "b3".into(),
            },
            OrderMismatch {
                position: 2,
                expected: "b3".into(),
                actual: "b2".into(),
            },
        ]
    );
    assert_eq!(report.order.matching_nodes, 2);
    assert_eq!(report.verdict, Verdict::Strong);
}

#[test]
fn high_rate_with_heavy_corruption_is_still_strong() {
    // 24 of 25 batches everywhere (96%), one node scrambled and re-delivering.
    let batches: Vec<String> = (1..=25).map(|i| format!("b{i}")).collect();
    let full: Vec<&str> = batches.iter().map(String::as_str).collect();
    let partial = &full[..24];
    let mut scrambled: Vec<&str> = partial.iter().rev().copied().collect();
    scrambled.push("b1");

    let report = analyze(&snapshot(vec![
        node("A", &full),
        node("B", partial),
        node("C", &scrambled),
    ]))
    .unwrap();

    assert!((report.agreement.consensus_rate - 96.0).abs() < 1e-9);
    assert!(!report.order.mismatches.is_empty());
    assert_eq!(report.duplicates[&id("C")], 1);
    assert_eq!(report.verdict, Verdict::Strong);
}

#[test]
fn duplicate_delivery_blocks_perfect() {
    let report = analyze(&snapshot(vec![
        node("A", &["b1", "b2", "b3"]),
        node("B", &["b1", "b2", "b3", "b1"]),
    ]))
    .unwrap();

    assert_eq!(report.agreement.consensus_rate, 100.0);
    assert_eq!(report.duplicates[&id("B")], 1);
    // The extra trailing record is past the reference length.
    assert!(report.order.mismatches.is_empty());
    assert_eq!(report.verdict, Verdict::Strong);
}

#[test]
fn sequence_gap_blocks_perfect() {
    let gapped = NodeLog::new(
        "B",
        vec![
            DeliveryRecord::new("b1", 1),
            DeliveryRecord::new("b2", 2),
            DeliveryRecord::new("b3", 4),
        ],
    );
    let report = analyze(&snapshot(vec![node("A", &["b1", "b2", "b3"]), gapped])).unwrap();

    let issue = &report.sequence_issues[&id("B")];
    assert_eq!(issue.missing, vec![3]);
    assert_eq!(issue.first_divergence, 2);
    assert_eq!(report.verdict, Verdict::Strong);
}

// ---------------------------------------------------------------------------
// Reference node and counts
// ---------------------------------------------------------------------------

#[test]
fn reference_is_lexically_smallest() {
    let report = analyze(&snapshot(vec![
        node("node-2", &["b2", "b1"]),
        node("node-10", &["b1", "b2"]),
    ]))
    .unwrap();

    assert_eq!(report.order.reference_node, id("node-10"));
    assert!(report.order.mismatches.contains_key(&id("node-2")));
    assert!(!report.order.mismatches.contains_key(&id("node-10")));
}

#[test]
fn delivery_counts_summary() {
    let report = analyze(&snapshot(vec![
        node("A", &["b1", "b2", "b3"]),
        node("B", &["b1", "b2"]),
        node("C", &["b1", "b2", "b3", "b4"]),
    ]))
    .unwrap();

    assert_eq!(report.node_count, 3);
    assert_eq!(report.deliveries.per_node[&id("B")], 2);
    assert_eq!(report.deliveries.summary.min, 2);
    assert_eq!(report.deliveries.summary.max, 4);
    assert!((report.deliveries.summary.avg - 3.0).abs() < 1e-9);
}

#[test]
fn report_serializes_deterministically() {
    let snap = snapshot(vec![
        node("C", &["b1", "b3"]),
        node("A", &["b1", "b2", "b3"]),
        node("B", &["b2", "b1", "b1"]),
    ]);
    let first = serde_json::to_string(&analyze(&snap).unwrap()).unwrap();
    let second = serde_json::to_string(&analyze(&snap).unwrap()).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_str(&first).unwrap();
    assert_eq!(value["verdict"], "PARTIAL");
    assert_eq!(value["order"]["reference_node"], "A");
    assert_eq!(value["deliveries"]["min"], 2);
}
