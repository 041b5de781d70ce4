//! Custom error types for netsnap
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for netsnap operations
#[derive(Error, Debug)]
pub enum NetsnapError {
    /// Missing credentials, bad settings, missing backup directory
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// A backup file that is not valid JSON or lacks required metadata
    #[error("Invalid snapshot file {}: {message}", path.display())]
    SnapshotFormat { path: PathBuf, message: String },

    /// A failed call to the Dashboard API
    #[error("{context}: {message}")]
    Remote {
        context: String,
        status: Option<u16>,
        message: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Validation errors for user input and settings
    #[error("Validation error: {0}")]
    Validation(String),
}

impl NetsnapError {
    /// Create a remote error for a failed request
    pub fn remote(
        context: impl Into<String>,
        status: Option<u16>,
        message: impl Into<String>,
    ) -> Self {
        Self::Remote {
            context: context.into(),
            status,
            message: message.into(),
        }
    }

    /// Create a snapshot format error for a file
    pub fn snapshot_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SnapshotFormat {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for networks
    pub fn network_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Network",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a configuration error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// Check if this is a remote service error
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Remote { .. })
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The error message without the request context, for reports that
    /// already name the item
    pub fn detail(&self) -> String {
        match self {
            Self::Remote { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether retrying the same request may succeed
    ///
    /// Rate limiting, server-side failures, and failures without an HTTP
    /// status (connection reset, timeout) are transient.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Remote { status: None, .. } => true,
            Self::Remote {
                status: Some(code), ..
            } => *code == 429 || *code >= 500,
            _ => false,
        }
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for NetsnapError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NetsnapError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for NetsnapError {
    fn from(err: reqwest::Error) -> Self {
        let status = err.status().map(|s| s.as_u16());
        let context = err
            .url()
            .map(|u| format!("Request to {}", u.path()))
            .unwrap_or_else(|| "Request".to_string());
        Self::Remote {
            context,
            status,
            message: err.to_string(),
        }
    }
}

/// Result type alias for netsnap operations
pub type NetsnapResult<T> = Result<T, NetsnapError>;
