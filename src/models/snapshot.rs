//! Snapshot model
//!
//! One snapshot is one complete captured configuration of a network. The
//! top-level keys are the on-disk format: `metadata`, `network`, `appliance`,
//! `switch`, `wireless`, `group_policies`, `devices`.

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::records::{Device, FirewallRuleSet, GroupPolicy, Ssid, SwitchDevice, Vlan};

/// Format version written into every new snapshot
pub const BACKUP_VERSION: &str = "1.0";

/// Identity of a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Capture time, ISO-8601
    pub timestamp: String,
    /// Network the snapshot was captured from
    pub network_id: String,
    /// Display name of that network at capture time
    pub network_name: String,
    /// Snapshot format version
    pub backup_version: String,
}

impl SnapshotMetadata {
    /// Metadata for a capture happening now
    pub fn now(network_id: impl Into<String>, network_name: impl Into<String>) -> Self {
        Self::at(Local::now(), network_id, network_name)
    }

    /// Metadata for a capture at a given time
    pub fn at(
        captured_at: DateTime<Local>,
        network_id: impl Into<String>,
        network_name: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: captured_at.to_rfc3339_opts(SecondsFormat::Secs, false),
            network_id: network_id.into(),
            network_name: network_name.into(),
            backup_version: BACKUP_VERSION.to_string(),
        }
    }

    /// Capture time as wall-clock time at the capture site
    ///
    /// Accepts RFC 3339 and offset-less ISO-8601 (`2025-11-27T14:30:22.123456`).
    pub fn captured_at(&self) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(&self.timestamp) {
            return Some(dt.naive_local());
        }
        self.timestamp.parse::<NaiveDateTime>().ok()
    }
}

/// Network-wide settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkSection {
    #[serde(default)]
    pub details: Value,
    #[serde(default)]
    pub alerts: Value,
}

/// Security appliance configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplianceSection {
    #[serde(default)]
    pub vlans: Vec<Vlan>,

    /// Absent when the rules could not be read
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_l3: Option<FirewallRuleSet>,

    #[serde(default)]
    pub firewall_l7: Value,
    #[serde(default)]
    pub traffic_shaping: Value,
    #[serde(default)]
    pub vpn_settings: Value,
    #[serde(default)]
    pub content_filtering: Value,
    #[serde(default)]
    pub security_malware: Value,
    #[serde(default)]
    pub port_forwarding: Value,
    #[serde(default)]
    pub one_to_one_nat: Value,
    #[serde(default)]
    pub one_to_many_nat: Value,
}

impl ApplianceSection {
    /// L3 rules in evaluation order, empty when none were captured
    pub fn firewall_rules(&self) -> &[super::records::FirewallRule] {
        self.firewall_l3
            .as_ref()
            .map(|set| set.rules.as_slice())
            .unwrap_or(&[])
    }
}

/// Switch configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SwitchSection {
    #[serde(default)]
    pub devices: Vec<SwitchDevice>,
}

/// Wireless configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WirelessSection {
    /// Configured SSIDs only
    #[serde(default)]
    pub ssids: Vec<Ssid>,
    #[serde(default)]
    pub rf_profiles: Value,
}

/// A complete configuration backup of one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub metadata: SnapshotMetadata,
    #[serde(default)]
    pub network: NetworkSection,
    #[serde(default)]
    pub appliance: ApplianceSection,
    #[serde(default)]
    pub switch: SwitchSection,
    #[serde(default)]
    pub wireless: WirelessSection,
    #[serde(default)]
    pub group_policies: Vec<GroupPolicy>,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Snapshot {
    /// An empty snapshot carrying only metadata
    pub fn new(metadata: SnapshotMetadata) -> Self {
        Self {
            metadata,
            network: NetworkSection::default(),
            appliance: ApplianceSection::default(),
            switch: SwitchSection::default(),
            wireless: WirelessSection::default(),
            group_policies: Vec::new(),
            devices: Vec::new(),
        }
    }

    /// Check the metadata a snapshot is identified and ordered by
    pub fn validate(&self) -> Result<(), String> {
        if self.metadata.network_id.trim().is_empty() {
            return Err("metadata.network_id is empty".to_string());
        }
        if self.metadata.captured_at().is_none() {
            return Err(format!(
                "metadata.timestamp is not ISO-8601: {:?}",
                self.metadata.timestamp
            ));
        }
        Ok(())
    }

    /// Item counts per category
    pub fn counts(&self) -> SnapshotCounts {
        SnapshotCounts {
            vlans: self.appliance.vlans.len(),
            firewall_rules: self.appliance.firewall_rules().len(),
            ssids: self.wireless.ssids.len(),
            group_policies: self.group_policies.len(),
            switches: self.switch.devices.len(),
            switch_ports: self.switch.devices.iter().map(|s| s.ports.len()).sum(),
            devices: self.devices.len(),
        }
    }
}

/// Item counts per category of a snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SnapshotCounts {
    pub vlans: usize,
    pub firewall_rules: usize,
    pub ssids: usize,
    pub group_policies: usize,
    pub switches: usize,
    pub switch_ports: usize,
    pub devices: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, TimeZone, Timelike};
    use serde_json::json;

    #[test]
    fn test_metadata_timestamp_is_rfc3339_seconds() {
        let at = Local.with_ymd_and_hms(2025, 11, 27, 14, 30, 22).unwrap();
        let meta = SnapshotMetadata::at(at, "L_1", "Branch Office");

        assert!(!meta.timestamp.contains('.'));
        assert_eq!(meta.backup_version, BACKUP_VERSION);
        let parsed = meta.captured_at().unwrap();
        assert_eq!(parsed.hour(), 14);
        assert_eq!(parsed.second(), 22);
    }

    #[test]
    fn test_offsetless_timestamp_parses() {
        let meta = SnapshotMetadata {
            timestamp: "2025-11-27T14:30:22.123456".into(),
            network_id: "L_1".into(),
            network_name: "Branch".into(),
            backup_version: "1.0".into(),
        };
        let parsed = meta.captured_at().unwrap();
        assert_eq!(parsed.year(), 2025);
        assert_eq!(parsed.minute(), 30);
    }

    #[test]
    fn test_missing_sections_default() {
        let snapshot: Snapshot = serde_json::from_value(json!({
            "metadata": {
                "timestamp": "2025-11-27T14:30:22",
                "network_id": "L_1",
                "network_name": "Branch",
                "backup_version": "1.0"
            }
        }))
        .unwrap();

        assert!(snapshot.appliance.vlans.is_empty());
        assert!(snapshot.appliance.firewall_l3.is_none());
        assert_eq!(snapshot.counts(), SnapshotCounts::default());
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_missing_metadata_field_rejected() {
        let result: Result<Snapshot, _> = serde_json::from_value(json!({
            "metadata": {"timestamp": "2025-11-27T14:30:22", "network_name": "Branch"}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_timestamp() {
        let mut snapshot = Snapshot::new(SnapshotMetadata::now("L_1", "Branch"));
        snapshot.metadata.timestamp = "yesterday".into();
        assert!(snapshot.validate().unwrap_err().contains("timestamp"));
    }
}
