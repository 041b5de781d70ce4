//! Configuration records
//!
//! Vendor records are typed on the fields netsnap compares or restores. Every
//! other field the API returns is kept in `extra` so a snapshot written back
//! to disk carries the full record.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Device model prefix identifying switches
pub const SWITCH_MODEL_PREFIX: &str = "MS";

/// Name prefix the vendor gives SSID slots nobody has configured
pub const UNCONFIGURED_SSID_PREFIX: &str = "Unconfigured";

/// An appliance VLAN, keyed by `id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vlan {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subnet: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appliance_ip: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The L3 firewall rule list; order is evaluation order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FirewallRuleSet {
    #[serde(default)]
    pub rules: Vec<FirewallRule>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One L3 firewall rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_cidr: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl FirewallRule {
    /// Whether this is the trailing allow-all rule the vendor appends itself
    ///
    /// Matches rules whose comment mentions "default" (any case), with policy
    /// `allow` and destination `any` (any case).
    pub fn is_default_allow(&self) -> bool {
        let comment_says_default = self
            .comment
            .as_deref()
            .map(|c| c.to_lowercase().contains("default"))
            .unwrap_or(false);
        let allows = self.policy.as_deref() == Some("allow");
        let to_any = self
            .dest_cidr
            .as_deref()
            .map(|d| d.eq_ignore_ascii_case("any"))
            .unwrap_or(false);

        comment_says_default && allows && to_any
    }
}

/// A wireless SSID slot, keyed by `number`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ssid {
    pub number: u32,

    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Ssid {
    /// Whether this slot still carries the vendor placeholder name
    pub fn is_unconfigured(&self) -> bool {
        self.name.starts_with(UNCONFIGURED_SSID_PREFIX)
    }
}

/// A switch with its port configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchDevice {
    pub serial: String,
    pub name: String,
    pub model: String,
    #[serde(default)]
    pub ports: Vec<SwitchPort>,
}

/// One switch port, keyed by `portId` within its switch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchPort {
    #[serde(deserialize_with = "string_or_number")]
    pub port_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vlan: Option<u32>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A group policy, keyed by `groupPolicyId`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupPolicy {
    #[serde(deserialize_with = "string_or_number")]
    pub group_policy_id: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheduling: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub firewall_and_traffic_shaping: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A device inventory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub serial: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub model: String,

    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Device {
    /// Whether this device is a switch
    pub fn is_switch(&self) -> bool {
        self.model.starts_with(SWITCH_MODEL_PREFIX)
    }

    /// Give the device a derived name if nobody assigned one
    pub fn ensure_name(&mut self) {
        if self.name.trim().is_empty() {
            self.name = fallback_device_name(&self.model, &self.serial);
        }
    }
}

/// Name used for devices without a user-assigned name
///
/// `{model}-{last 4 chars of serial}`, e.g. `MS120-8-A1B2`.
pub fn fallback_device_name(model: &str, serial: &str) -> String {
    let chars: Vec<char> = serial.chars().collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}-{}", model, tail)
}

/// Accept ids the API sometimes sends as numbers and sometimes as strings
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Num(n) => n.to_string(),
    })
}

/// Treat `null` as an empty string
fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vlan_numeric_id_read_as_string() {
        let vlan: Vlan = serde_json::from_value(json!({
            "id": 10,
            "name": "Corp",
            "subnet": "10.10.10.0/24",
            "applianceIp": "10.10.10.1",
            "dhcpHandling": "Run a DHCP server"
        }))
        .unwrap();

        assert_eq!(vlan.id, "10");
        assert_eq!(vlan.appliance_ip.as_deref(), Some("10.10.10.1"));
        assert_eq!(vlan.extra["dhcpHandling"], "Run a DHCP server");
    }

    #[test]
    fn test_unknown_fields_survive_serialization() {
        let raw = json!({
            "portId": "1",
            "name": "Uplink",
            "type": "trunk",
            "vlan": 1,
            "allowedVlans": "1,10,20",
            "poeEnabled": false
        });
        let port: SwitchPort = serde_json::from_value(raw.clone()).unwrap();

        assert_eq!(port.port_type.as_deref(), Some("trunk"));
        assert_eq!(serde_json::to_value(&port).unwrap(), raw);
    }

    #[test]
    fn test_null_name_becomes_empty() {
        let device: Device = serde_json::from_value(json!({
            "serial": "Q2XX-ABCD-1234",
            "model": "MX68",
            "name": null
        }))
        .unwrap();
        assert_eq!(device.name, "");
    }

    #[test]
    fn test_fallback_device_name() {
        assert_eq!(fallback_device_name("MS120-8", "Q2HP-ABCD-9F3E"), "MS120-8-9F3E");
        assert_eq!(fallback_device_name("MR36", "AB"), "MR36-AB");
    }

    #[test]
    fn test_ensure_name_keeps_assigned_name() {
        let mut device: Device = serde_json::from_value(json!({
            "serial": "Q2XX-ABCD-1234",
            "model": "MX68",
            "name": "Branch MX"
        }))
        .unwrap();
        device.ensure_name();
        assert_eq!(device.name, "Branch MX");

        device.name.clear();
        device.ensure_name();
        assert_eq!(device.name, "MX68-1234");
    }

    #[test]
    fn test_default_allow_detection() {
        let rule = |comment: &str, policy: &str, dest: &str| FirewallRule {
            comment: Some(comment.into()),
            policy: Some(policy.into()),
            dest_cidr: Some(dest.into()),
            extra: Map::new(),
        };

        assert!(rule("Default rule", "allow", "Any").is_default_allow());
        assert!(rule("default allow", "allow", "any").is_default_allow());
        assert!(!rule("Default rule", "deny", "Any").is_default_allow());
        assert!(!rule("Default rule", "allow", "10.0.0.0/8").is_default_allow());
        assert!(!rule("Allow web", "allow", "Any").is_default_allow());
    }

    #[test]
    fn test_unconfigured_ssid() {
        let ssid: Ssid =
            serde_json::from_value(json!({"number": 3, "name": "Unconfigured SSID 4"})).unwrap();
        assert!(ssid.is_unconfigured());
    }
}
