//! Backup CLI commands
//!
//! Implements `backup`, `list` and `show`.

use std::fs;
use std::path::Path;

use crate::api::resolve_network;
use crate::backup::{capture, load_snapshot, BackupManager};
use crate::display::{format_backup_list, format_capture_report, format_size, format_snapshot_summary};
use crate::error::NetsnapResult;

use super::CliContext;

/// Capture the configured network and save it as a new backup
pub fn handle_backup_command(ctx: &CliContext, network_id: Option<&str>) -> NetsnapResult<()> {
    let client = ctx.client()?;
    let network = resolve_network(&client, &ctx.settings, network_id)?;

    println!("Backing up {} ({})", network.name, network.id);
    println!();

    let outcome = capture(&client, &network.id, &network.name);

    let manager = BackupManager::new(ctx.paths.backup_dir());
    let backup_path = manager.save(&outcome.snapshot)?;

    print!("{}", format_snapshot_summary(&outcome.snapshot));
    println!();
    print!("{}", format_capture_report(&outcome.report));
    println!();
    println!("Backup saved: {}", backup_path.display());
    println!("Size: {}", format_size(fs::metadata(&backup_path)?.len()));

    Ok(())
}

/// List backups, newest first
pub fn handle_list_command(ctx: &CliContext, verbose: bool) -> NetsnapResult<()> {
    let manager = ctx.existing_backups()?;
    let listing = manager.list_backups()?;

    print!("{}", format_backup_list(&listing, verbose));
    Ok(())
}

/// Show what one backup contains
pub fn handle_show_command(ctx: &CliContext, backup: &str) -> NetsnapResult<()> {
    let backup_path = if Path::new(backup).is_file() {
        Path::new(backup).to_path_buf()
    } else {
        ctx.existing_backups()?.resolve(backup)?
    };
    let snapshot = load_snapshot(&backup_path)?;

    println!("File: {}", backup_path.display());
    println!("Size: {}", format_size(fs::metadata(&backup_path)?.len()));
    println!();
    print!("{}", format_snapshot_summary(&snapshot));
    Ok(())
}
