//! Restore CLI command
//!
//! Always interactive: the operator must type the confirmation phrase.

use crate::backup::{RestoreOutcome, Restorer, CONFIRMATION_PHRASE};
use crate::display::{format_backup_list, format_restore_report, heading};
use crate::error::NetsnapResult;

use super::prompt::{prompt_index, prompt_line};
use super::CliContext;

/// Restore a backup onto its own network, or onto `target_network`
pub fn handle_restore_command(
    ctx: &CliContext,
    backup: Option<&str>,
    target_network: Option<&str>,
) -> NetsnapResult<()> {
    // Fail on a missing key before asking the operator anything
    let client = ctx.client()?;
    let manager = ctx.existing_backups()?;

    println!("WARNING: This tool can overwrite your current configuration!");
    println!("Only use this for disaster recovery.");
    println!();

    let backup_path = match backup {
        Some(backup) => manager.resolve(backup)?,
        None => {
            let listing = manager.list_backups()?;
            print!("{}", format_backup_list(&listing, false));
            if listing.is_empty() {
                return Ok(());
            }

            println!();
            match prompt_index("Select backup to restore (#): ")? {
                Some(n) => listing.get(n)?.path.clone(),
                None => {
                    println!();
                    println!("✗ Cancelled");
                    return Ok(());
                }
            }
        }
    };

    let snapshot = manager.load(&backup_path)?;
    let network_id = target_network.unwrap_or(&snapshot.metadata.network_id);

    println!();
    print!("{}", heading("Restoring From Backup"));
    println!("Backup Details:");
    println!("  Network: {}", snapshot.metadata.network_name);
    println!("  Date: {}", snapshot.metadata.timestamp);
    println!("  Backup Version: {}", snapshot.metadata.backup_version);
    println!("  Target network: {}", network_id);
    println!();
    println!("WARNING: This will OVERWRITE the target's current configuration!");
    println!("Make sure you have a current backup before proceeding!");
    println!();

    let typed = prompt_line(&format!(
        "Type '{}' to continue, or anything else to cancel: ",
        CONFIRMATION_PHRASE
    ))?
    .unwrap_or_default();

    let restorer = Restorer::new(&client, network_id);
    match restorer.confirm_and_restore(&snapshot, &typed) {
        RestoreOutcome::Completed(report) => {
            println!();
            print!("{}", format_restore_report(&report));
        }
        RestoreOutcome::Aborted => {
            println!();
            println!("✗ Restore cancelled");
        }
    }

    Ok(())
}
