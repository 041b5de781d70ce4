//! Shared fixtures for unit tests

use serde_json::{json, Map};

use crate::models::{FirewallRule, Snapshot, SnapshotMetadata};

/// A branch-office snapshot with every restorable category populated
pub(crate) fn sample_snapshot() -> Snapshot {
    serde_json::from_value(json!({
        "metadata": {
            "timestamp": "2025-11-27T14:30:22+00:00",
            "network_id": "L_646829496481105433",
            "network_name": "Chicago Branch Office",
            "backup_version": "1.0"
        },
        "network": {
            "details": {"id": "L_646829496481105433", "name": "Chicago Branch Office", "timeZone": "America/Chicago"},
            "alerts": {"defaultDestinations": {"emails": [], "allAdmins": true}}
        },
        "appliance": {
            "vlans": [
                {"id": "1", "name": "Default", "subnet": "192.168.1.0/24", "applianceIp": "192.168.1.1"},
                {"id": "10", "name": "Corp", "subnet": "10.10.10.0/24", "applianceIp": "10.10.10.1"},
                {"id": "20", "name": "Guest", "subnet": "10.20.20.0/24", "applianceIp": "10.20.20.1"}
            ],
            "firewall_l3": {
                "rules": [
                    {"comment": "Block guest to corp", "policy": "deny", "protocol": "any",
                     "srcCidr": "10.20.20.0/24", "destCidr": "10.10.10.0/24", "srcPort": "Any", "destPort": "Any"},
                    {"comment": "Allow web", "policy": "allow", "protocol": "tcp",
                     "srcCidr": "Any", "destCidr": "Any", "srcPort": "Any", "destPort": "443"},
                    {"comment": "Default rule", "policy": "allow", "protocol": "Any",
                     "srcCidr": "Any", "destCidr": "Any", "srcPort": "Any", "destPort": "Any"}
                ]
            },
            "firewall_l7": {"rules": []},
            "traffic_shaping": {"globalBandwidthLimits": {"limitUp": 0, "limitDown": 0}},
            "vpn_settings": {"mode": "none"},
            "content_filtering": {"blockedUrlCategories": []},
            "security_malware": {"mode": "disabled"},
            "port_forwarding": {"rules": []},
            "one_to_one_nat": {"rules": []},
            "one_to_many_nat": {"rules": []}
        },
        "switch": {
            "devices": [{
                "serial": "Q2HP-AAAA-0001",
                "name": "MS120-8-0001",
                "model": "MS120-8",
                "ports": [
                    {"portId": "1", "name": "Uplink", "enabled": true, "type": "trunk", "vlan": 1, "allowedVlans": "all"},
                    {"portId": "2", "name": "Desk 1", "enabled": true, "type": "access", "vlan": 10, "voiceVlan": 30, "poeEnabled": true}
                ]
            }]
        },
        "wireless": {
            "ssids": [
                {"number": 0, "name": "Corp WiFi", "enabled": true, "authMode": "psk", "psk": "hunter22", "defaultVlanId": 10, "ipAssignmentMode": "Bridge mode"},
                {"number": 1, "name": "Guest WiFi", "enabled": true, "authMode": "open", "splashPage": "Click-through splash page"}
            ],
            "rf_profiles": []
        },
        "group_policies": [
            {"groupPolicyId": "101", "name": "Guest Limited",
             "bandwidth": {"settings": "custom", "bandwidthLimits": {"limitUp": 1024, "limitDown": 5120}},
             "scheduling": {"enabled": false},
             "splashAuthSettings": "network default"}
        ],
        "devices": [
            {"serial": "Q2XX-BBBB-0002", "model": "MX68", "name": "Branch MX", "status": "online"},
            {"serial": "Q2HP-AAAA-0001", "model": "MS120-8", "name": "MS120-8-0001"}
        ]
    }))
    .expect("sample snapshot fixture is valid")
}

/// An empty snapshot with the given capture time and network name
pub(crate) fn snapshot_at(timestamp: &str, network_name: &str) -> Snapshot {
    Snapshot::new(SnapshotMetadata {
        timestamp: timestamp.to_string(),
        network_id: "L_1".to_string(),
        network_name: network_name.to_string(),
        backup_version: "1.0".to_string(),
    })
}

/// A firewall rule with only the compared fields set
pub(crate) fn rule(comment: &str, policy: &str, dest_cidr: &str) -> FirewallRule {
    FirewallRule {
        comment: Some(comment.to_string()),
        policy: Some(policy.to_string()),
        dest_cidr: Some(dest_cidr.to_string()),
        extra: Map::new(),
    }
}
