//! consensus-audit: checks per-node delivery logs for consensus agreement.

mod config;
mod render;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use audit_loader::{LoaderError, LogLoader};
use audit_utils::LogFormat;
use config::{AuditConfig, OutputFormat};
use render::{JsonOutput, RenderLimits};

#[derive(Parser)]
#[command(
    name = "consensus-audit",
    about = "Verify that nodes delivered the same batches in the same order"
)]
struct Cli {
    /// Log root with one subdirectory per node.
    /// Defaults to a `logs` directory next to this executable.
    log_dir: Option<PathBuf>,

    /// Name of the delivery log inside each node directory.
    #[arg(long, env = "AUDIT_DELIVERED_FILE")]
    delivered_file: Option<String>,

    /// Report format.
    #[arg(long, value_enum, env = "AUDIT_FORMAT")]
    format: Option<OutputFormat>,

    /// Missing sequence numbers listed per node before truncating.
    #[arg(long, env = "AUDIT_MAX_MISSING_SHOWN")]
    max_missing_shown: Option<usize>,

    /// Nodes with more order divergences than this only get a count.
    #[arg(long, env = "AUDIT_MAX_MISMATCHES_SHOWN")]
    max_mismatches_shown: Option<usize>,

    /// Log format: "human" or "json".
    #[arg(long, env = "AUDIT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "AUDIT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Merge the optional config file with flag and env overrides.
    fn resolve(self) -> anyhow::Result<AuditConfig> {
        let base = match &self.config {
            Some(path) => AuditConfig::from_toml_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => AuditConfig::default(),
        };

        Ok(AuditConfig {
            log_dir: self.log_dir.unwrap_or(base.log_dir),
            delivered_file: self.delivered_file.unwrap_or(base.delivered_file),
            output_format: self.format.unwrap_or(base.output_format),
            max_missing_shown: self.max_missing_shown.unwrap_or(base.max_missing_shown),
            max_mismatches_shown: self
                .max_mismatches_shown
                .unwrap_or(base.max_mismatches_shown),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.unwrap_or(base.log_level),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().resolve()?;
    audit_utils::init_logging(config.log_format, &config.log_level);

    tracing::info!("Analyzing logs in: {}", config.log_dir.display());

    let loader = LogLoader::new(config.delivered_file.as_str());
    let outcome = match loader.load(&config.log_dir) {
        Ok(outcome) => outcome,
        Err(e @ (LoaderError::RootNotFound(_) | LoaderError::RootNotDirectory(_))) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
        Err(e) => return Err(e).context("loading delivery logs"),
    };

    if outcome.snapshot.is_empty() {
        tracing::error!(
            "No node data could be loaded from {}",
            config.log_dir.display()
        );
        std::process::exit(1);
    }

    let report = audit_analyzer::analyze(&outcome.snapshot).context("analyzing delivery logs")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match config.output_format {
        OutputFormat::Human => render::render_human(
            &mut out,
            &report,
            &outcome.summary,
            RenderLimits {
                max_missing_shown: config.max_missing_shown,
                max_mismatches_shown: config.max_mismatches_shown,
            },
        )?,
        OutputFormat::Json => render::render_json(
            &mut out,
            &JsonOutput {
                log_dir: &config.log_dir,
                load: &outcome.summary,
                report: &report,
            },
        )?,
    }
    out.flush()?;

    tracing::info!(verdict = %report.verdict, "audit complete");
    Ok(())
}
