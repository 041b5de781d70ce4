//! Core data models for netsnap
//!
//! The snapshot shape persisted to disk, the configuration records inside it,
//! and the sparse update structure used when writing records back.

pub mod records;
pub mod snapshot;
pub mod sparse;

pub use records::{
    fallback_device_name, Device, FirewallRule, FirewallRuleSet, GroupPolicy, Ssid,
    SwitchDevice, SwitchPort, Vlan,
};
pub use snapshot::{
    ApplianceSection, NetworkSection, Snapshot, SnapshotCounts, SnapshotMetadata, SwitchSection,
    WirelessSection, BACKUP_VERSION,
};
pub use sparse::SparseUpdate;
