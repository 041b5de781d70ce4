//! Comparison and restore report formatting

use std::fmt::Write;

use super::heading;
use crate::backup::{ComparisonReport, RestoreReport, RestoreStep};
use crate::models::SnapshotMetadata;

/// Format the differences between two snapshots
pub fn format_comparison(
    old: &SnapshotMetadata,
    new: &SnapshotMetadata,
    report: &ComparisonReport,
) -> String {
    let mut output = heading("Backup Comparison");

    let _ = writeln!(output, "Backup 1: {}", old.network_name);
    let _ = writeln!(output, "  Date: {}", old.timestamp);
    let _ = writeln!(output, "Backup 2: {}", new.network_name);
    let _ = writeln!(output, "  Date: {}", new.timestamp);
    let _ = writeln!(output);

    if report.is_empty() {
        output.push_str(&heading("No Changes Detected"));
        output.push_str("The two backups are identical\n");
        return output;
    }

    output.push_str(&heading("Changes Detected"));
    for section in &report.sections {
        let _ = writeln!(output, "{}:", section.category);
        for change in &section.changes {
            let _ = writeln!(output, "  {}", change);
        }
        let _ = writeln!(output);
    }
    let _ = writeln!(output, "Total: {} change(s)", report.total_changes());

    output
}

/// Format what a restore wrote, skipped and failed, step by step
pub fn format_restore_report(report: &RestoreReport) -> String {
    let mut output = heading("Restore Complete");
    let _ = writeln!(output, "Target network: {}", report.network_id);
    let _ = writeln!(output);

    let total = RestoreStep::ALL.len();
    for step in &report.steps {
        let _ = writeln!(
            output,
            "[{}/{}] {}: {} restored, {} skipped, {} failed",
            step.step.number(),
            total,
            step.step,
            step.succeeded.len(),
            step.skipped.len(),
            step.failures.len()
        );
        for skipped in &step.skipped {
            let _ = writeln!(output, "  ⊘ {}: {}", skipped.item, skipped.reason);
        }
        for failure in &step.failures {
            let _ = writeln!(output, "  ⚠ {}: {}", failure.item, failure.message);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "{}", report.summary());
    if report.is_clean() {
        output.push_str("✓ Verify all settings in Dashboard\n");
    } else {
        output.push_str("Some items failed; review them in Dashboard before relying on this network\n");
    }

    output
}
