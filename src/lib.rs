//! netsnap - configuration backup and restore for cloud-managed networks
//!
//! This library captures the configuration of a Meraki Dashboard network into
//! a JSON snapshot, keeps snapshots as files on disk, compares two snapshots
//! category by category, and replays a snapshot onto a network.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `api`: Dashboard API boundary and HTTP client
//! - `backup`: Capture, persistence, comparison and restore
//! - `cli`: Command handlers for the `netsnap` binary
//! - `config`: Configuration and path management
//! - `display`: Terminal formatting
//! - `error`: Custom error types
//! - `logging`: Log subscriber setup
//! - `models`: Snapshot and configuration records
//! - `storage`: JSON file helpers
//!
//! # Example
//!
//! ```rust,ignore
//! use netsnap::config::{NetsnapPaths, Settings};
//!
//! let paths = NetsnapPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod api;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use error::NetsnapError;
