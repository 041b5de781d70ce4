//! Backup display formatting
//!
//! Formats backup listings and snapshot contents for terminal output.

use std::fmt::Write;

use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::{format_size, heading};
use crate::backup::{BackupListing, CaptureReport};
use crate::models::Snapshot;

/// Items listed per category before the rest is summarized
const PREVIEW_LIMIT: usize = 5;

#[derive(Tabled)]
struct BackupRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Captured")]
    captured: String,
    #[tabled(rename = "Size")]
    size: String,
}

#[derive(Tabled)]
struct VerboseBackupRow {
    #[tabled(rename = "#")]
    number: usize,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Network ID")]
    network_id: String,
    #[tabled(rename = "Captured")]
    captured: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "File")]
    file: String,
}

/// Format the numbered, newest-first backup table
pub fn format_backup_list(listing: &BackupListing, verbose: bool) -> String {
    let mut output = heading("Available Backups");

    if listing.is_empty() {
        output.push_str("No backups found.\n");
        output.push_str("Create one with: netsnap backup\n");
    } else {
        let rows = listing.entries.iter().enumerate();
        let mut table = if verbose {
            Table::new(rows.map(|(i, b)| VerboseBackupRow {
                number: i + 1,
                network: b.metadata.network_name.clone(),
                network_id: b.metadata.network_id.clone(),
                captured: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                version: b.metadata.backup_version.clone(),
                size: format_size(b.size_bytes),
                file: b.filename.clone(),
            }))
        } else {
            Table::new(rows.map(|(i, b)| BackupRow {
                number: i + 1,
                network: b.metadata.network_name.clone(),
                captured: b.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                size: format_size(b.size_bytes),
            }))
        };
        table.with(Style::psql());

        let _ = writeln!(output, "{}", table);
        let _ = writeln!(output);
        let _ = writeln!(output, "Total: {} backup(s)", listing.len());
    }

    if !listing.errors.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "Unreadable files ({}):", listing.errors.len());
        for error in &listing.errors {
            let name = error
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| error.path.display().to_string());
            let _ = writeln!(output, "  ! {}: {}", name, error.message);
        }
    }

    output
}

/// Format what a snapshot contains
pub fn format_snapshot_summary(snapshot: &Snapshot) -> String {
    let meta = &snapshot.metadata;
    let counts = snapshot.counts();
    let mut output = heading("Backup Summary");

    let _ = writeln!(output, "Network:        {}", meta.network_name);
    let _ = writeln!(output, "Network ID:     {}", meta.network_id);
    let _ = writeln!(output, "Captured:       {}", meta.timestamp);
    let _ = writeln!(output, "Backup version: {}", meta.backup_version);
    let _ = writeln!(output);
    let _ = writeln!(output, "Configuration Items:");

    let _ = writeln!(output, "  VLANs: {}", counts.vlans);
    for vlan in snapshot.appliance.vlans.iter().take(PREVIEW_LIMIT) {
        let _ = writeln!(
            output,
            "    - VLAN {}: {} ({})",
            vlan.id,
            vlan.name,
            vlan.subnet.as_deref().unwrap_or("no subnet")
        );
    }
    if counts.vlans > PREVIEW_LIMIT {
        let _ = writeln!(output, "    ... and {} more", counts.vlans - PREVIEW_LIMIT);
    }

    match &snapshot.appliance.firewall_l3 {
        Some(_) => {
            let _ = writeln!(output, "  Firewall Rules (L3): {}", counts.firewall_rules);
        }
        None => {
            let _ = writeln!(output, "  Firewall Rules (L3): not captured");
        }
    }

    let _ = writeln!(output, "  Wireless SSIDs: {}", counts.ssids);
    for ssid in &snapshot.wireless.ssids {
        let vlan = ssid
            .extra
            .get("defaultVlanId")
            .map(|v| v.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let _ = writeln!(output, "    - {} (VLAN {})", ssid.name, vlan);
    }

    let _ = writeln!(output, "  Group Policies: {}", counts.group_policies);
    for policy in &snapshot.group_policies {
        let _ = writeln!(output, "    - {}", policy.name);
    }

    let _ = writeln!(
        output,
        "  Switches: {} ({} ports)",
        counts.switches, counts.switch_ports
    );
    for switch in &snapshot.switch.devices {
        let _ = writeln!(output, "    - {}: {} ports", switch.name, switch.ports.len());
    }

    let _ = writeln!(output, "  Devices: {}", counts.devices);
    for device in &snapshot.devices {
        let _ = writeln!(
            output,
            "    - {} ({}, {})",
            device.name, device.model, device.serial
        );
    }

    output
}

/// Format the categories a capture could not read
pub fn format_capture_report(report: &CaptureReport) -> String {
    if report.is_complete() {
        return "All categories captured.\n".to_string();
    }

    let mut output = format!(
        "{} categor{} could not be captured:\n",
        report.failures.len(),
        if report.failures.len() == 1 { "y" } else { "ies" }
    );
    for failure in &report.failures {
        let _ = writeln!(output, "  ⚠ {}: {}", failure.category, failure.message);
    }
    output
}
