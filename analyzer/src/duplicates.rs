//! Re-delivery detection within a single node's stream.

use std::collections::HashSet;

use audit_types::NodeLog;

/// Number of records whose batch id already appeared earlier in the same
/// stream, i.e. `len(records) - |distinct batch ids|`.
pub fn duplicate_count(log: &NodeLog) -> usize {
    let mut seen = HashSet::with_capacity(log.delivery_count());
    log.batch_ids().filter(|batch| !seen.insert(*batch)).count()
}
