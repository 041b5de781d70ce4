//! Configuration module for netsnap
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::NetsnapPaths;
pub use settings::Settings;
