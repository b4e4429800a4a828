//! Discovery of node directories and loading of their delivery logs.

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use audit_types::{DeliverySnapshot, NodeId, NodeLog};

use crate::parse::parse_records;
use crate::summary::{LoadSummary, MalformedLine, SkipReason, SkippedNode};
use crate::LoaderError;

/// File name the node's delivery logger writes by default.
pub const DEFAULT_DELIVERED_FILE: &str = "delivered.jsonl";

/// Result of loading a log root: the snapshot plus everything skipped on the way.
#[derive(Debug)]
pub struct LoadOutcome {
    pub snapshot: DeliverySnapshot,
    pub summary: LoadSummary,
}

/// Loads one delivery log per node directory under a log root.
#[derive(Clone, Debug)]
pub struct LogLoader {
    delivered_file: String,
}

impl Default for LogLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DELIVERED_FILE)
    }
}

impl LogLoader {
    pub fn new(delivered_file: impl Into<String>) -> Self {
        Self {
            delivered_file: delivered_file.into(),
        }
    }

    /// Load every node directory under `root`, in lexical directory order.
    ///
    /// Fails only if `root` is missing or cannot be listed. Nodes without a
    /// readable log are skipped with a warning; an empty snapshot is a valid
    /// outcome and left for the caller to judge.
    pub fn load(&self, root: &Path) -> Result<LoadOutcome, LoaderError> {
        if !root.exists() {
            return Err(LoaderError::RootNotFound(root.to_path_buf()));
        }
        if !root.is_dir() {
            return Err(LoaderError::RootNotDirectory(root.to_path_buf()));
        }

        let mut snapshot = DeliverySnapshot::new();
        let mut summary = LoadSummary::default();

        for node_dir in node_dirs(root)? {
            let node_id = node_id_for(&node_dir);
            let log_path = node_dir.join(&self.delivered_file);

            let file = match File::open(&log_path) {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    tracing::warn!(node = %node_id, file = %self.delivered_file, "no delivery log, skipping node");
                    summary.skipped_nodes.push(SkippedNode {
                        node_id,
                        reason: SkipReason::MissingLog,
                    });
                    continue;
                }
                Err(e) => {
                    tracing::warn!(node = %node_id, path = %log_path.display(), error = %e, "cannot open delivery log, skipping node");
                    summary.skipped_nodes.push(SkippedNode {
                        node_id,
                        reason: SkipReason::Unreadable(e.to_string()),
                    });
                    continue;
                }
            };

            let parsed = match parse_records(BufReader::new(file)) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!(node = %node_id, path = %log_path.display(), error = %e, "failed reading delivery log, skipping node");
                    summary.skipped_nodes.push(SkippedNode {
                        node_id,
                        reason: SkipReason::Unreadable(e.to_string()),
                    });
                    continue;
                }
            };

            let records = parsed.records.len();
            if snapshot
                .insert(NodeLog::new(node_id.clone(), parsed.records))
                .is_err()
            {
                tracing::warn!(node = %node_id, path = %node_dir.display(), "node id already loaded, skipping directory");
                summary.skipped_nodes.push(SkippedNode {
                    node_id,
                    reason: SkipReason::DuplicateId,
                });
                continue;
            }

            for (line, reason) in parsed.malformed {
                tracing::warn!(node = %node_id, line, %reason, "failed to parse line");
                summary.malformed_lines.push(MalformedLine {
                    node_id: node_id.clone(),
                    line,
                    reason,
                });
            }
            tracing::debug!(node = %node_id, records, "loaded delivery log");
        }

        tracing::info!(
            nodes = snapshot.len(),
            skipped = summary.skipped_nodes.len(),
            malformed_lines = summary.malformed_lines.len(),
            "log load complete"
        );

        Ok(LoadOutcome { snapshot, summary })
    }
}

/// Subdirectories of `root`, sorted by name. Plain files are ignored.
fn node_dirs(root: &Path) -> Result<Vec<PathBuf>, LoaderError> {
    let read_dir_err = |source: io::Error| LoaderError::ReadDir {
        path: root.to_path_buf(),
        source,
    };

    let mut dirs = Vec::new();
    for entry in fs::read_dir(root).map_err(read_dir_err)? {
        let path = entry.map_err(read_dir_err)?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

fn node_id_for(dir: &Path) -> NodeId {
    let name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());
    NodeId::new(name)
}
