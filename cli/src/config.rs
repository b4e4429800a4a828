//! Audit configuration with TOML file support.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use audit_loader::DEFAULT_DELIVERED_FILE;
use audit_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// How the report is written to stdout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Sectioned, human-readable report.
    #[default]
    Human,
    /// The full report and load summary as pretty-printed JSON.
    Json,
}

/// Configuration for an audit run.
///
/// Can be loaded from a TOML file via [`AuditConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Resolved once at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Root directory holding one subdirectory per node.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// Name of the delivery log inside each node directory.
    #[serde(default = "default_delivered_file")]
    pub delivered_file: String,

    /// Report output format.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Missing sequence numbers listed per node before truncating.
    #[serde(default = "default_max_missing_shown")]
    pub max_missing_shown: usize,

    /// Nodes with more order divergences than this only get a count.
    #[serde(default = "default_max_mismatches_shown")]
    pub max_mismatches_shown: usize,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

/// `logs` next to the executable, falling back to `./logs`.
fn default_log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn default_delivered_file() -> String {
    DEFAULT_DELIVERED_FILE.to_string()
}

fn default_max_missing_shown() -> usize {
    10
}

fn default_max_mismatches_shown() -> usize {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl AuditConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            delivered_file: default_delivered_file(),
            output_format: OutputFormat::default(),
            max_missing_shown: default_max_missing_shown(),
            max_mismatches_shown: default_max_mismatches_shown(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
