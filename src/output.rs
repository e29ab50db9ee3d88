//! CLI output formatting.
//!
//! Output is information-centric: the primary display for every file is its
//! name plus what happened to it, with byte counts and dimensions as
//! secondary context on the same line.
//!
//! ## Run
//!
//! ```text
//! scan.png: 5.2 MiB → 1.1 MiB, 2400x1800 (normalized)
//! small.jpg: 840 KiB (passed through)
//! notes.txt: failed - not an image: declared type "application/octet-stream"
//!
//! 2 written (1 normalized, 1 passed through), 1 failed
//! ```
//!
//! ## Check
//!
//! ```text
//! scan.png: 4000x3000, 5.2 MiB → would normalize to 2400x1800
//! small.jpg: 1000x800, 840 KiB → would pass through
//! ```

use crate::batch::{FileReport, Inspection, Outcome, PlannedAction};

/// Human-readable byte count (B, KiB, MiB with one decimal).
pub fn format_bytes(n: usize) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = 1024.0 * 1024.0;

    let n = n as f64;
    if n >= MIB {
        format!("{:.1} MiB", n / MIB)
    } else if n >= KIB {
        format!("{:.0} KiB", n / KIB)
    } else {
        format!("{} B", n as usize)
    }
}

/// One line per file for a batch run.
pub fn format_file_report(report: &FileReport) -> String {
    match &report.outcome {
        Outcome::Normalized { fallback_used } => {
            let dims = report
                .output_dimensions
                .map(|(w, h)| format!(", {w}x{h}"))
                .unwrap_or_default();
            let note = if *fallback_used {
                " (normalized, fallback pass)"
            } else {
                " (normalized)"
            };
            format!(
                "{}: {} → {}{}{}",
                report.file,
                format_bytes(report.source_bytes),
                format_bytes(report.output_bytes.unwrap_or(0)),
                dims,
                note
            )
        }
        Outcome::PassedThrough => format!(
            "{}: {} (passed through)",
            report.file,
            format_bytes(report.source_bytes)
        ),
        Outcome::Failed { reason } => format!("{}: failed - {}", report.file, reason),
    }
}

/// Summary line for a batch run.
pub fn format_summary(reports: &[FileReport]) -> String {
    let normalized = reports
        .iter()
        .filter(|r| matches!(r.outcome, Outcome::Normalized { .. }))
        .count();
    let passed = reports
        .iter()
        .filter(|r| r.outcome == Outcome::PassedThrough)
        .count();
    let failed = reports.len() - normalized - passed;

    format!(
        "{} written ({} normalized, {} passed through), {} failed",
        normalized + passed,
        normalized,
        passed,
        failed
    )
}

/// One line per file for a dry run.
pub fn format_inspection(row: &Inspection) -> String {
    let dims = row
        .dimensions
        .map(|(w, h)| format!("{w}x{h}, "))
        .unwrap_or_default();
    let size = format_bytes(row.source_bytes);

    match &row.action {
        PlannedAction::Normalize { width, height } => {
            format!(
                "{}: {}{} → would normalize to {}x{}",
                row.file, dims, size, width, height
            )
        }
        PlannedAction::PassThrough => {
            format!("{}: {}{} → would pass through", row.file, dims, size)
        }
        PlannedAction::Reject { reason } => format!("{}: rejected - {}", row.file, reason),
    }
}
