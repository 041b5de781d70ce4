//! Path management for netsnap
//!
//! Provides XDG-compliant path resolution for settings and backups.
//!
//! ## Path Resolution Order
//!
//! 1. `NETSNAP_HOME` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/netsnap` or `~/.config/netsnap`
//! 3. Windows: `%APPDATA%\netsnap`

use std::path::PathBuf;

use crate::error::NetsnapError;

/// Environment variable overriding the base directory
pub const HOME_ENV: &str = "NETSNAP_HOME";

/// Manages all paths used by netsnap
#[derive(Debug, Clone)]
pub struct NetsnapPaths {
    /// Base directory for settings and backups
    base_dir: PathBuf,
    /// Explicit backup directory, replacing `<base>/backups`
    backup_dir_override: Option<PathBuf>,
}

impl NetsnapPaths {
    /// Create a new NetsnapPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, NetsnapError> {
        let base_dir = match std::env::var(HOME_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self {
            base_dir,
            backup_dir_override: None,
        })
    }

    /// Create NetsnapPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self {
            base_dir,
            backup_dir_override: None,
        }
    }

    /// Use `dir` for backups instead of `<base>/backups`
    pub fn with_backup_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.backup_dir_override = dir;
        self
    }

    /// Get the base directory (~/.config/netsnap/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the backup directory
    pub fn backup_dir(&self) -> PathBuf {
        self.backup_dir_override
            .clone()
            .unwrap_or_else(|| self.base_dir.join("backups"))
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base and backup directories exist
    pub fn ensure_directories(&self) -> Result<(), NetsnapError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| NetsnapError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| NetsnapError::Io(format!("Failed to create backup directory: {}", e)))?;

        Ok(())
    }
}

/// Resolve the default base directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, NetsnapError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => {
            let home = std::env::var("HOME").map_err(|_| {
                NetsnapError::Config(format!(
                    "Could not determine home directory; set {} instead",
                    HOME_ENV
                ))
            })?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("netsnap"))
}

/// Resolve the default base directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, NetsnapError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| NetsnapError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("netsnap"))
}
