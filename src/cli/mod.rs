//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the backup subsystem.

pub mod backup;
pub mod compare;
pub mod networks;
pub mod prompt;
pub mod restore;

pub use backup::{handle_backup_command, handle_list_command, handle_show_command};
pub use compare::handle_compare_command;
pub use networks::{handle_config_command, handle_networks_command};
pub use restore::handle_restore_command;

use crate::api::DashboardClient;
use crate::backup::BackupManager;
use crate::config::{NetsnapPaths, Settings};
use crate::error::{NetsnapError, NetsnapResult};

/// Environment variable holding the Dashboard API key
pub const API_KEY_ENV: &str = "MERAKI_API_KEY";

/// Everything a command needs from the environment
pub struct CliContext {
    pub paths: NetsnapPaths,
    pub settings: Settings,
    api_key: Option<String>,
}

impl CliContext {
    pub fn new(paths: NetsnapPaths, settings: Settings, api_key: Option<String>) -> Self {
        Self {
            paths,
            settings,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    /// Whether an API key was supplied
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Dashboard client; fails before any request when no key is set
    pub fn client(&self) -> NetsnapResult<DashboardClient> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            NetsnapError::Config(format!(
                "{} is not set; export it or pass --api-key",
                API_KEY_ENV
            ))
        })?;
        DashboardClient::new(api_key, &self.settings)
    }

    /// Manager for a backup directory that must already exist
    pub fn existing_backups(&self) -> NetsnapResult<BackupManager> {
        BackupManager::open(self.paths.backup_dir())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(api_key: Option<&str>) -> (CliContext, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = NetsnapPaths::with_base_dir(temp_dir.path().to_path_buf());
        let ctx = CliContext::new(paths, Settings::default(), api_key.map(String::from));
        (ctx, temp_dir)
    }

    #[test]
    fn test_missing_api_key_is_config_error() {
        let (ctx, _temp) = context(None);
        assert!(!ctx.has_api_key());
        assert!(ctx.client().err().unwrap().is_config());

        let (blank, _temp) = context(Some("  "));
        assert!(!blank.has_api_key());
    }

    #[test]
    fn test_missing_backup_dir_is_config_error() {
        let (ctx, _temp) = context(Some("key"));
        assert!(ctx.existing_backups().err().unwrap().is_config());
    }
}
