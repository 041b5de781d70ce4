//! `networks` and `config` commands

use crate::api::{list_networks, list_organizations};
use crate::display::heading;
use crate::error::NetsnapResult;

use super::CliContext;

/// List every network of every organization the API key can see
pub fn handle_networks_command(ctx: &CliContext) -> NetsnapResult<()> {
    let client = ctx.client()?;
    let organizations = list_organizations(&client)?;

    print!("{}", heading("Networks"));
    if organizations.is_empty() {
        println!("No organizations visible to this API key.");
        return Ok(());
    }

    let filter = ctx.settings.network_name_filter.to_lowercase();
    for org in &organizations {
        println!("Organization: {} ({})", org.name, org.id);
        let networks = list_networks(&client, &org.id)?;
        if networks.is_empty() {
            println!("  (no networks)");
        }
        for network in &networks {
            let marker = if network.name.to_lowercase().contains(&filter) {
                " *"
            } else {
                ""
            };
            println!(
                "  - {} ({}) [{}]{}",
                network.name,
                network.id,
                network.product_types.join(", "),
                marker
            );
        }
        println!();
    }
    println!(
        "* matches the network name filter '{}'",
        ctx.settings.network_name_filter
    );

    Ok(())
}

/// Show resolved paths and settings; `init` writes the settings file
pub fn handle_config_command(ctx: &CliContext, init: bool) -> NetsnapResult<()> {
    if init {
        ctx.settings.save(&ctx.paths)?;
        println!("Settings written to {}", ctx.paths.settings_file().display());
        println!();
    }

    let settings = &ctx.settings;
    println!("netsnap Configuration");
    println!("=====================");
    println!("Base directory:   {}", ctx.paths.base_dir().display());
    println!("Backup directory: {}", ctx.paths.backup_dir().display());
    println!("Settings file:    {}", ctx.paths.settings_file().display());
    println!();
    println!("Settings:");
    println!("  API base URL:        {}", settings.api_base_url);
    println!(
        "  Organization ID:     {}",
        settings.organization_id.as_deref().unwrap_or("(first visible)")
    );
    println!(
        "  Network ID:          {}",
        settings.network_id.as_deref().unwrap_or("(match by name)")
    );
    println!("  Network name filter: {}", settings.network_name_filter);
    println!("  Max attempts:        {}", settings.max_retries);
    println!("  Request timeout:     {}s", settings.request_timeout_secs);
    println!(
        "  API key:             {}",
        if ctx.has_api_key() { "set" } else { "not set" }
    );

    Ok(())
}
