#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use audit_types::{DeliveryRecord, DeliverySnapshot, NodeLog, Verdict};

#[derive(Arbitrary, Debug)]
struct Cluster {
    nodes: Vec<(u8, Vec<(u8, i8)>)>,
}

fuzz_target!(|cluster: Cluster| {
    let mut snapshot = DeliverySnapshot::new();
    for (id, records) in cluster.nodes.into_iter().take(16) {
        let records = records
            .into_iter()
            .take(64)
            .map(|(batch, seq)| DeliveryRecord::new(format!("b{}", batch % 32), seq as i64))
            .collect();
        // Repeated ids are rejected by the snapshot; skip them.
        let _ = snapshot.insert(NodeLog::new(format!("n{id}"), records));
    }

    let Ok(report) = audit_analyzer::analyze(&snapshot) else {
        assert!(snapshot.is_empty());
        return;
    };

    let rate = report.agreement.consensus_rate;
    assert!((0.0..=100.0).contains(&rate));
    assert!(report.order.matching_nodes >= 1);
    if report.verdict == Verdict::Perfect {
        assert!(report.findings().is_clean());
    }
});
