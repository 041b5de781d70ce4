//! Backup system for netsnap
//!
//! # Architecture
//!
//! - `capture`: reads a live network into a [`Snapshot`](crate::models::Snapshot)
//! - `BackupManager`: saves, lists and loads snapshot files
//! - `compare`: field-specific differences between two snapshots
//! - `Restorer`: replays a snapshot onto a network behind a confirmation gate
//!
//! # Backup Format
//!
//! Backups are pretty-printed JSON files named
//! `backup_<network>_<YYYYMMDD_HHMMSS>.json` with the top-level keys
//! `metadata`, `network`, `appliance`, `switch`, `wireless`, `group_policies`
//! and `devices`.
//!
//! # Example
//!
//! ```rust,ignore
//! use netsnap::backup::{capture, BackupManager};
//!
//! let outcome = capture(&client, &network.id, &network.name);
//! let manager = BackupManager::new(paths.backup_dir());
//! let path = manager.save(&outcome.snapshot)?;
//!
//! // Later, restore onto the same network
//! let snapshot = manager.load(&path)?;
//! let restorer = Restorer::new(&client, &snapshot.metadata.network_id);
//! match restorer.confirm_and_restore(&snapshot, &typed) {
//!     RestoreOutcome::Completed(report) => println!("{}", report.summary()),
//!     RestoreOutcome::Aborted => println!("Restore cancelled"),
//! }
//! ```

mod capture;
mod compare;
mod manager;
mod restore;

pub use capture::{capture, CaptureOutcome, CaptureReport, CategoryFailure};
pub use compare::{compare, Category, CategoryChanges, Change, ComparisonReport};
pub use manager::{
    backup_filename, load_snapshot, sanitize_network_name, BackupInfo, BackupListing,
    BackupManager, ListingError,
};
pub use restore::{
    Confirmation, ItemFailure, RestoreOutcome, RestoreReport, RestoreStep, Restorer, SkippedItem,
    StepReport, CONFIRMATION_PHRASE, GROUP_POLICY_FIELDS, SSID_FIELDS, SWITCH_PORT_FIELDS,
    VLAN_FIELDS,
};
