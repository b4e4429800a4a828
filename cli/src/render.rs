//! Presentation of a consensus report.

use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;

use audit_analyzer::ConsensusReport;
use audit_loader::LoadSummary;
use audit_types::Verdict;

const WIDTH: usize = 80;

/// Caps applied to long listings in the human report.
#[derive(Clone, Copy, Debug)]
pub struct RenderLimits {
    pub max_missing_shown: usize,
    pub max_mismatches_shown: usize,
}

/// Everything emitted in `--format json` mode.
#[derive(Serialize)]
pub struct JsonOutput<'a> {
    pub log_dir: &'a Path,
    pub load: &'a LoadSummary,
    pub report: &'a ConsensusReport,
}

pub fn render_json<W: Write>(out: &mut W, output: &JsonOutput<'_>) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, output)?;
    writeln!(out)
}

fn heavy_rule() -> String {
    "=".repeat(WIDTH)
}

fn light_rule() -> String {
    "─".repeat(WIDTH)
}

/// Write the sectioned human-readable report.
pub fn render_human<W: Write>(
    out: &mut W,
    report: &ConsensusReport,
    load: &LoadSummary,
    limits: RenderLimits,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", heavy_rule())?;
    writeln!(out, "BLS CONSENSUS ANALYSIS ({} nodes)", report.node_count)?;
    writeln!(out, "{}", heavy_rule())?;
    writeln!(out)?;

    render_load_issues(out, load)?;
    render_counts(out, report)?;
    render_agreement(out, report)?;
    render_order(out, report, limits)?;
    render_duplicates(out, report)?;
    render_sequences(out, report, limits)?;
    render_verdict(out, report)
}

fn render_load_issues<W: Write>(out: &mut W, load: &LoadSummary) -> io::Result<()> {
    if load.is_clean() {
        return Ok(());
    }
    writeln!(out, "Load Issues:")?;
    writeln!(out, "{}", light_rule())?;
    for skipped in &load.skipped_nodes {
        writeln!(out, "  ⚠  {}: skipped ({})", skipped.node_id, skipped.reason)?;
    }
    if !load.malformed_lines.is_empty() {
        writeln!(out, "  ⚠  {} malformed line(s) skipped", load.malformed_lines.len())?;
    }
    writeln!(out)
}

fn render_counts<W: Write>(out: &mut W, report: &ConsensusReport) -> io::Result<()> {
    writeln!(out, "Message Delivery Counts:")?;
    writeln!(out, "{}", light_rule())?;
    for (node_id, count) in &report.deliveries.per_node {
        writeln!(out, "  {:15} : {:4} messages", node_id, count)?;
    }
    let summary = &report.deliveries.summary;
    writeln!(out, "{}", light_rule())?;
    writeln!(
        out,
        "  Min: {} | Max: {} | Avg: {:.1}",
        summary.min, summary.max, summary.avg
    )?;
    if !summary.is_uniform() {
        writeln!(out, "  ⚠  Delivery counts differ across nodes")?;
    }
    writeln!(out)
}

fn render_agreement<W: Write>(out: &mut W, report: &ConsensusReport) -> io::Result<()> {
    let agreement = &report.agreement;
    writeln!(out, "Checking Batch ID Consensus:")?;
    writeln!(out, "{}", light_rule())?;
    writeln!(out, "  Total unique batches: {}", agreement.total_batches)?;
    writeln!(out, "  Batches on all nodes: {}", agreement.common_batches)?;
    writeln!(out, "  Consensus rate:       {:.1}%", agreement.consensus_rate)?;
    writeln!(out)?;

    if agreement.missing.is_empty() {
        writeln!(out, "  ✓ All nodes have the same set of batches!")?;
    } else {
        writeln!(out, "  ⚠  Nodes missing batches:")?;
        for (node_id, missing) in &agreement.missing {
            writeln!(out, "     {}: missing {} batches", node_id, missing.len())?;
        }
    }
    writeln!(out)
}

fn render_order<W: Write>(
    out: &mut W,
    report: &ConsensusReport,
    limits: RenderLimits,
) -> io::Result<()> {
    let order = &report.order;
    writeln!(out, "Checking Chain Order Consistency:")?;
    writeln!(out, "{}", light_rule())?;
    writeln!(out, "  Reference node: {}", order.reference_node)?;
    writeln!(
        out,
        "  Nodes with matching order: {}/{}",
        order.matching_nodes, report.node_count
    )?;

    if order.all_match() {
        writeln!(out, "  ✓ All nodes have identical delivery order!")?;
    } else {
        writeln!(out)?;
        writeln!(out, "  ⚠  Order mismatches detected:")?;
        for (node_id, mismatches) in &order.mismatches {
            writeln!(
                out,
                "     {}: {} position(s) differ from reference",
                node_id,
                mismatches.len()
            )?;
            if mismatches.len() <= limits.max_mismatches_shown {
                for m in mismatches {
                    writeln!(
                        out,
                        "       @ position {}: expected {}, got {}",
                        m.position, m.expected, m.actual
                    )?;
                }
            }
        }
    }
    writeln!(out)
}

fn render_duplicates<W: Write>(out: &mut W, report: &ConsensusReport) -> io::Result<()> {
    writeln!(out, "Checking for Duplicate Deliveries:")?;
    writeln!(out, "{}", light_rule())?;
    if report.duplicates.is_empty() {
        writeln!(out, "  ✓ No duplicates found on any node!")?;
    }
    for (node_id, count) in &report.duplicates {
        writeln!(out, "  ⚠  {}: {} duplicate(s)", node_id, count)?;
    }
    writeln!(out)
}

fn render_sequences<W: Write>(
    out: &mut W,
    report: &ConsensusReport,
    limits: RenderLimits,
) -> io::Result<()> {
    writeln!(out, "Checking Sequence Number Integrity:")?;
    writeln!(out, "{}", light_rule())?;
    if report.sequence_issues.is_empty() {
        writeln!(out, "  ✓ All nodes have contiguous sequence numbers!")?;
    }
    for (node_id, issue) in &report.sequence_issues {
        writeln!(
            out,
            "  ⚠  {}: sequence numbers are not contiguous (first divergence at index {})",
            node_id, issue.first_divergence
        )?;
        if !issue.missing.is_empty() {
            let shown = &issue.missing[..issue.missing.len().min(limits.max_missing_shown)];
            let more = issue.missing.len() - shown.len();
            if more > 0 {
                writeln!(out, "      Missing: {:?} (+{} more)", shown, more)?;
            } else {
                writeln!(out, "      Missing: {:?}", shown)?;
            }
        }
    }
    writeln!(out)
}

fn render_verdict<W: Write>(out: &mut W, report: &ConsensusReport) -> io::Result<()> {
    writeln!(out, "{}", heavy_rule())?;
    writeln!(out, "FINAL VERDICT:")?;
    writeln!(out, "{}", heavy_rule())?;
    match report.verdict {
        Verdict::Perfect => {
            writeln!(out, "✅ PERFECT CONSENSUS ACHIEVED!")?;
            writeln!(out, "   - All nodes delivered the same messages")?;
            writeln!(out, "   - Delivery order is identical across all nodes")?;
            writeln!(out, "   - No duplicates or sequence issues")?;
        }
        Verdict::Strong => {
            writeln!(out, "✓ STRONG CONSENSUS (>=95%)")?;
            writeln!(out, "  - Most messages were consistently delivered")?;
            writeln!(out, "  - Minor inconsistencies may exist")?;
        }
        Verdict::Partial => {
            writeln!(out, "⚠  PARTIAL CONSENSUS")?;
            writeln!(
                out,
                "  - Only {:.1}% of messages achieved full consensus",
                report.agreement.consensus_rate
            )?;
            writeln!(out, "  - Review network connectivity and threshold settings")?;
        }
    }
    writeln!(out, "{}", heavy_rule())?;
    writeln!(out)
}
