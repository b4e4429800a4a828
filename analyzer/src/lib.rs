//! Consensus analysis over per-node delivery logs.
//!
//! Given every node's delivered-message stream, the analyzer answers whether
//! the nodes agreed and where they did not:
//! - **Set agreement**: which batches every node delivered, and which each one missed.
//! - **Order**: position-by-position comparison against a reference node.
//! - **Duplicates**: batches a node delivered more than once.
//! - **Sequencing**: whether each node's `seq` values run exactly 1..=n.
//!
//! The four findings are folded into a single [`Verdict`](audit_types::Verdict).
//! Analysis is a pure function of the snapshot; per-node checks run in
//! parallel and are merged into ordered maps, so repeated runs produce
//! identical reports.

pub mod agreement;
pub mod analyzer;
pub mod duplicates;
pub mod error;
pub mod order;
pub mod report;
pub mod sequence;
pub mod verdict;

pub use agreement::SetAgreement;
pub use analyzer::analyze;
pub use error::AnalyzeError;
pub use order::{OrderConsistency, OrderMismatch};
pub use report::{ConsensusReport, DeliveryCounts};
pub use sequence::SequenceIssue;
pub use verdict::{classify, StructuralFindings, FULL_CONSENSUS_RATE, STRONG_CONSENSUS_RATE};
