//! Compare CLI command

use crate::backup::compare;
use crate::display::{format_backup_list, format_comparison};
use crate::error::NetsnapResult;

use super::prompt::prompt_index;
use super::CliContext;

/// Compare two backups picked by listing number (or `latest`, filename, path)
///
/// Numbers not given on the command line are asked for interactively.
pub fn handle_compare_command(
    ctx: &CliContext,
    first: Option<&str>,
    second: Option<&str>,
) -> NetsnapResult<()> {
    let manager = ctx.existing_backups()?;

    let (first_path, second_path) = match (first, second) {
        (Some(first), Some(second)) => (manager.resolve(first)?, manager.resolve(second)?),
        _ => {
            let listing = manager.list_backups()?;
            print!("{}", format_backup_list(&listing, false));

            if listing.len() < 2 {
                println!();
                println!("Need at least 2 backups to compare.");
                println!("Run 'netsnap backup' to create more.");
                return Ok(());
            }

            println!();
            println!("Select backups to compare:");
            let first_path = match first {
                Some(first) => manager.resolve(first)?,
                None => match prompt_index("First backup (#): ")? {
                    Some(n) => listing.get(n)?.path.clone(),
                    None => return cancelled(),
                },
            };
            let second_path = match prompt_index("Second backup (#): ")? {
                Some(n) => listing.get(n)?.path.clone(),
                None => return cancelled(),
            };
            (first_path, second_path)
        }
    };

    let old = manager.load(&first_path)?;
    let new = manager.load(&second_path)?;
    let report = compare(&old, &new);

    println!();
    print!("{}", format_comparison(&old.metadata, &new.metadata, &report));
    Ok(())
}

fn cancelled() -> NetsnapResult<()> {
    println!();
    println!("Cancelled");
    Ok(())
}
