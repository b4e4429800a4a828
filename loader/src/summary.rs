//! What the loader skipped, kept for the final report.

use std::fmt;

use serde::Serialize;

use audit_types::NodeId;

/// Why a node directory contributed nothing to the snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The directory has no delivery log file.
    MissingLog,
    /// The log file exists but could not be read.
    Unreadable(String),
    /// Another directory already produced the same node id (non-UTF-8
    /// names can collapse to one id).
    DuplicateId,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLog => f.write_str("no delivery log"),
            Self::Unreadable(e) => write!(f, "unreadable delivery log: {e}"),
            Self::DuplicateId => f.write_str("node id already loaded from another directory"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkippedNode {
    pub node_id: NodeId,
    pub reason: SkipReason,
}

/// A line that was dropped while parsing a node's log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MalformedLine {
    pub node_id: NodeId,
    /// 1-based line number within the node's log.
    pub line: usize,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub skipped_nodes: Vec<SkippedNode>,
    pub malformed_lines: Vec<MalformedLine>,
}

impl LoadSummary {
    /// Whether every node directory and every line loaded cleanly.
    pub fn is_clean(&self) -> bool {
        self.skipped_nodes.is_empty() && self.malformed_lines.is_empty()
    }

    /// Malformed line count for one node.
    pub fn malformed_for(&self, node_id: &NodeId) -> usize {
        self.malformed_lines
            .iter()
            .filter(|m| &m.node_id == node_id)
            .count()
    }
}
