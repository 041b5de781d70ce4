use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use netsnap::cli::{
    handle_backup_command, handle_compare_command, handle_config_command,
    handle_list_command, handle_networks_command, handle_restore_command, handle_show_command,
    CliContext,
};
use netsnap::config::{NetsnapPaths, Settings};
use netsnap::logging::init_logging;
use netsnap::NetsnapError;

#[derive(Parser)]
#[command(
    name = "netsnap",
    version,
    about = "Back up, compare and restore Meraki network configuration",
    long_about = "netsnap captures the configuration of a Meraki Dashboard network \
                  (VLANs, firewall rules, SSIDs, switch ports, group policies and more) \
                  into timestamped JSON backups, compares backups, and restores them \
                  for disaster recovery."
)]
struct Cli {
    /// Debug logging; `list` also shows more columns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Backup directory (default: <config dir>/backups)
    #[arg(long, global = true, value_name = "DIR")]
    backup_dir: Option<PathBuf>,

    /// Dashboard API key
    #[arg(long, global = true, env = "MERAKI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Capture the network configuration and save a backup
    Backup {
        /// Network ID (default: settings, then first name match)
        #[arg(short, long, env = "MERAKI_NETWORK_ID")]
        network: Option<String>,
    },

    /// List all available backups, newest first
    #[command(alias = "ls")]
    List,

    /// Show the contents of a backup
    Show {
        /// Backup number, 'latest', filename or path
        backup: String,
    },

    /// Compare two backups
    #[command(alias = "diff")]
    Compare {
        /// Older backup number (prompted when omitted)
        first: Option<String>,
        /// Newer backup number (prompted when omitted)
        second: Option<String>,
    },

    /// Restore a backup onto a network
    Restore {
        /// Backup number (prompted when omitted)
        backup: Option<String>,

        /// Target network ID (default: the backup's own network)
        #[arg(short, long)]
        network: Option<String>,
    },

    /// List organizations and their networks
    Networks,

    /// Show current configuration and paths
    Config {
        /// Write the settings file with current values
        #[arg(long)]
        init: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(exit_code(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = NetsnapPaths::new()?.with_backup_dir(cli.backup_dir);
    let settings = Settings::load_or_create(&paths)?;
    let ctx = CliContext::new(paths, settings, cli.api_key);

    match cli.command {
        Commands::Backup { network } => handle_backup_command(&ctx, network.as_deref())?,
        Commands::List => handle_list_command(&ctx, cli.verbose)?,
        Commands::Show { backup } => handle_show_command(&ctx, &backup)?,
        Commands::Compare { first, second } => {
            handle_compare_command(&ctx, first.as_deref(), second.as_deref())?
        }
        Commands::Restore { backup, network } => {
            handle_restore_command(&ctx, backup.as_deref(), network.as_deref())?
        }
        Commands::Networks => handle_networks_command(&ctx)?,
        Commands::Config { init } => handle_config_command(&ctx, init)?,
    }

    Ok(())
}

/// 2 for configuration problems, 1 for everything else
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<NetsnapError>() {
        Some(e) if e.is_config() => 2,
        _ => 1,
    }
}
