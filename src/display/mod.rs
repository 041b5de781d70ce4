//! Display formatting for terminal output
//!
//! Formatters return strings; the CLI decides where to print them.

pub mod backup;
pub mod report;

pub use backup::{format_backup_list, format_capture_report, format_snapshot_summary};
pub use report::{format_comparison, format_restore_report};

/// A title underlined with `=`, followed by a blank line
pub fn heading(title: &str) -> String {
    format!("{}\n{}\n\n", title, "=".repeat(title.chars().count()))
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
