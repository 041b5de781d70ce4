//! User settings for netsnap
//!
//! Manages the Dashboard API endpoint, retry limits, and which network the
//! `backup` command targets when none is given on the command line.

use serde::{Deserialize, Serialize};

use super::paths::NetsnapPaths;
use crate::error::NetsnapError;

/// Default Dashboard API base URL
pub const DEFAULT_API_BASE_URL: &str = "https://api.meraki.com/api/v1";

/// User settings for netsnap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Dashboard API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Organization to search for networks (first one when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,

    /// Network to back up (searched by name when unset)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_id: Option<String>,

    /// Case-insensitive substring used to pick the network by name
    #[serde(default = "default_network_name_filter")]
    pub network_name_filter: String,

    /// Total attempts per request, including the first
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_network_name_filter() -> String {
    "branch office".to_string()
}

fn default_max_retries() -> u32 {
    3
}

fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            api_base_url: default_api_base_url(),
            organization_id: None,
            network_id: None,
            network_name_filter: default_network_name_filter(),
            max_retries: default_max_retries(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &NetsnapPaths) -> Result<Self, NetsnapError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| NetsnapError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            NetsnapError::Config(format!(
                "Failed to parse settings file {}: {}",
                settings_path.display(),
                e
            ))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &NetsnapPaths) -> Result<(), NetsnapError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| NetsnapError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| NetsnapError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject values the API client cannot work with
    pub fn validate(&self) -> Result<(), NetsnapError> {
        if self.api_base_url.trim().is_empty() {
            return Err(NetsnapError::Config("api_base_url must not be empty".into()));
        }
        if self.max_retries == 0 {
            return Err(NetsnapError::Config("max_retries must be at least 1".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(NetsnapError::Config(
                "request_timeout_secs must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
