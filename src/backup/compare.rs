//! Snapshot comparison
//!
//! Field-specific differences between two snapshots of the same network,
//! grouped by category. Comparison is pure: nothing is read or written.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{FirewallRule, Snapshot, SwitchPort};

/// Category a change belongs to, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Vlans,
    FirewallRules,
    WirelessSsids,
    GroupPolicies,
    SwitchConfiguration,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Vlans => "VLANs",
            Self::FirewallRules => "Firewall Rules",
            Self::WirelessSsids => "Wireless SSIDs",
            Self::GroupPolicies => "Group Policies",
            Self::SwitchConfiguration => "Switch Configuration",
        };
        f.write_str(label)
    }
}

/// One difference between two snapshots
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    VlanAdded {
        id: String,
        name: String,
        subnet: Option<String>,
    },
    VlanRemoved {
        id: String,
        name: String,
    },
    VlanRenamed {
        id: String,
        old: String,
        new: String,
    },
    VlanSubnetChanged {
        id: String,
        old: Option<String>,
        new: Option<String>,
    },
    /// Rule lists of different length; rules are not compared one by one
    FirewallRuleCount {
        old: usize,
        new: usize,
    },
    /// 1-based rule position
    FirewallRuleComment {
        position: usize,
        old: Option<String>,
        new: Option<String>,
    },
    FirewallRulePolicy {
        position: usize,
        old: Option<String>,
        new: Option<String>,
    },
    FirewallRuleDestination {
        position: usize,
    },
    SsidAdded {
        number: u32,
        name: String,
    },
    SsidRemoved {
        number: u32,
        name: String,
    },
    SsidRenamed {
        number: u32,
        old: String,
        new: String,
    },
    SsidToggled {
        number: u32,
        name: String,
        enabled: bool,
    },
    PolicyAdded {
        name: String,
    },
    PolicyRemoved {
        name: String,
    },
    SwitchPortsChanged {
        switch: String,
        ports: usize,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VlanAdded { id, name, subnet } => write!(
                f,
                "+ VLAN {} added: {} ({})",
                id,
                name,
                subnet.as_deref().unwrap_or("no subnet")
            ),
            Self::VlanRemoved { id, name } => write!(f, "- VLAN {} removed: {}", id, name),
            Self::VlanRenamed { id, old, new } => {
                write!(f, "Δ VLAN {} renamed: '{}' → '{}'", id, old, new)
            }
            Self::VlanSubnetChanged { id, old, new } => write!(
                f,
                "Δ VLAN {} subnet changed: {} → {}",
                id,
                old.as_deref().unwrap_or("none"),
                new.as_deref().unwrap_or("none")
            ),
            Self::FirewallRuleCount { old, new } => {
                write!(f, "Δ Firewall rule count: {} → {}", old, new)
            }
            Self::FirewallRuleComment { position, old, new } => write!(
                f,
                "Δ Rule {}: '{}' → '{}'",
                position,
                old.as_deref().unwrap_or("[No comment]"),
                new.as_deref().unwrap_or("[No comment]")
            ),
            Self::FirewallRulePolicy { position, old, new } => write!(
                f,
                "Δ Rule {} policy: {} → {}",
                position,
                old.as_deref().unwrap_or("none"),
                new.as_deref().unwrap_or("none")
            ),
            Self::FirewallRuleDestination { position } => {
                write!(f, "Δ Rule {} destination changed", position)
            }
            Self::SsidAdded { number, name } => write!(f, "+ SSID {} added: {}", number, name),
            Self::SsidRemoved { number, name } => {
                write!(f, "- SSID {} removed: {}", number, name)
            }
            Self::SsidRenamed { number, old, new } => {
                write!(f, "Δ SSID {} renamed: '{}' → '{}'", number, old, new)
            }
            Self::SsidToggled {
                number,
                name,
                enabled,
            } => write!(
                f,
                "Δ SSID {} ({}): {}",
                number,
                name,
                if *enabled { "enabled" } else { "disabled" }
            ),
            Self::PolicyAdded { name } => write!(f, "+ Policy added: {}", name),
            Self::PolicyRemoved { name } => write!(f, "- Policy removed: {}", name),
            Self::SwitchPortsChanged { switch, ports } => {
                write!(f, "Δ Switch {}: {} port(s) changed", switch, ports)
            }
        }
    }
}

/// Changes of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryChanges {
    pub category: Category,
    pub changes: Vec<Change>,
}

/// All differences between two snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Categories with at least one change, in category order
    pub sections: Vec<CategoryChanges>,
}

impl ComparisonReport {
    /// Whether the snapshots are equivalent in every compared field
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of changes across categories
    pub fn total_changes(&self) -> usize {
        self.sections.iter().map(|s| s.changes.len()).sum()
    }

    /// Changes of one category, empty if it has none
    pub fn changes_in(&self, category: Category) -> &[Change] {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.changes.as_slice())
            .unwrap_or(&[])
    }
}

/// Compare `old` against `new`
pub fn compare(old: &Snapshot, new: &Snapshot) -> ComparisonReport {
    let candidates = [
        (Category::Vlans, compare_vlans(old, new)),
        (Category::FirewallRules, compare_firewall_rules(old, new)),
        (Category::WirelessSsids, compare_ssids(old, new)),
        (Category::GroupPolicies, compare_group_policies(old, new)),
        (Category::SwitchConfiguration, compare_switch_ports(old, new)),
    ];

    ComparisonReport {
        sections: candidates
            .into_iter()
            .filter(|(_, changes)| !changes.is_empty())
            .map(|(category, changes)| CategoryChanges { category, changes })
            .collect(),
    }
}

fn compare_vlans(old: &Snapshot, new: &Snapshot) -> Vec<Change> {
    let old_vlans = &old.appliance.vlans;
    let new_vlans = &new.appliance.vlans;
    let old_by_id: HashMap<&str, _> = old_vlans.iter().map(|v| (v.id.as_str(), v)).collect();
    let new_by_id: HashMap<&str, _> = new_vlans.iter().map(|v| (v.id.as_str(), v)).collect();

    let mut changes = Vec::new();

    for vlan in new_vlans {
        if !old_by_id.contains_key(vlan.id.as_str()) {
            changes.push(Change::VlanAdded {
                id: vlan.id.clone(),
                name: vlan.name.clone(),
                subnet: vlan.subnet.clone(),
            });
        }
    }

    for vlan in old_vlans {
        if !new_by_id.contains_key(vlan.id.as_str()) {
            changes.push(Change::VlanRemoved {
                id: vlan.id.clone(),
                name: vlan.name.clone(),
            });
        }
    }

    for before in old_vlans {
        let Some(after) = new_by_id.get(before.id.as_str()) else {
            continue;
        };
        if before.name != after.name {
            changes.push(Change::VlanRenamed {
                id: before.id.clone(),
                old: before.name.clone(),
                new: after.name.clone(),
            });
        }
        if before.subnet != after.subnet {
            changes.push(Change::VlanSubnetChanged {
                id: before.id.clone(),
                old: before.subnet.clone(),
                new: after.subnet.clone(),
            });
        }
    }

    changes
}

fn compare_firewall_rules(old: &Snapshot, new: &Snapshot) -> Vec<Change> {
    let old_rules = old.appliance.firewall_rules();
    let new_rules = new.appliance.firewall_rules();

    // Positions shift after an insert or delete, so only the count is meaningful
    if old_rules.len() != new_rules.len() {
        return vec![Change::FirewallRuleCount {
            old: old_rules.len(),
            new: new_rules.len(),
        }];
    }

    let mut changes = Vec::new();
    for (i, (before, after)) in old_rules.iter().zip(new_rules).enumerate() {
        changes.extend(compare_rule(i + 1, before, after));
    }
    changes
}

fn compare_rule(position: usize, before: &FirewallRule, after: &FirewallRule) -> Vec<Change> {
    let mut changes = Vec::new();
    if before.comment != after.comment {
        changes.push(Change::FirewallRuleComment {
            position,
            old: before.comment.clone(),
            new: after.comment.clone(),
        });
    }
    if before.policy != after.policy {
        changes.push(Change::FirewallRulePolicy {
            position,
            old: before.policy.clone(),
            new: after.policy.clone(),
        });
    }
    if before.dest_cidr != after.dest_cidr {
        changes.push(Change::FirewallRuleDestination { position });
    }
    changes
}

fn compare_ssids(old: &Snapshot, new: &Snapshot) -> Vec<Change> {
    let old_by_number: HashMap<u32, _> = old.wireless.ssids.iter().map(|s| (s.number, s)).collect();
    let new_by_number: HashMap<u32, _> = new.wireless.ssids.iter().map(|s| (s.number, s)).collect();

    let mut numbers: Vec<u32> = old_by_number
        .keys()
        .chain(new_by_number.keys())
        .copied()
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();
    numbers.sort_unstable();

    let mut changes = Vec::new();
    for number in numbers {
        match (old_by_number.get(&number), new_by_number.get(&number)) {
            (None, Some(after)) => changes.push(Change::SsidAdded {
                number,
                name: after.name.clone(),
            }),
            (Some(before), None) => changes.push(Change::SsidRemoved {
                number,
                name: before.name.clone(),
            }),
            (Some(before), Some(after)) => {
                if before.name != after.name {
                    changes.push(Change::SsidRenamed {
                        number,
                        old: before.name.clone(),
                        new: after.name.clone(),
                    });
                }
                if before.enabled != after.enabled {
                    changes.push(Change::SsidToggled {
                        number,
                        name: after.name.clone(),
                        enabled: after.enabled.unwrap_or(false),
                    });
                }
            }
            (None, None) => {}
        }
    }
    changes
}

fn compare_group_policies(old: &Snapshot, new: &Snapshot) -> Vec<Change> {
    let old_ids: HashSet<&str> = old
        .group_policies
        .iter()
        .map(|p| p.group_policy_id.as_str())
        .collect();
    let new_ids: HashSet<&str> = new
        .group_policies
        .iter()
        .map(|p| p.group_policy_id.as_str())
        .collect();

    let added = new
        .group_policies
        .iter()
        .filter(|p| !old_ids.contains(p.group_policy_id.as_str()))
        .map(|p| Change::PolicyAdded {
            name: p.name.clone(),
        });
    let removed = old
        .group_policies
        .iter()
        .filter(|p| !new_ids.contains(p.group_policy_id.as_str()))
        .map(|p| Change::PolicyRemoved {
            name: p.name.clone(),
        });

    added.chain(removed).collect()
}

fn compare_switch_ports(old: &Snapshot, new: &Snapshot) -> Vec<Change> {
    let new_by_serial: HashMap<&str, _> = new
        .switch
        .devices
        .iter()
        .map(|s| (s.serial.as_str(), s))
        .collect();

    let mut changes = Vec::new();
    for before in &old.switch.devices {
        let Some(after) = new_by_serial.get(before.serial.as_str()) else {
            continue;
        };
        let after_ports: HashMap<&str, &SwitchPort> =
            after.ports.iter().map(|p| (p.port_id.as_str(), p)).collect();

        let changed = before
            .ports
            .iter()
            .filter(|p| {
                after_ports
                    .get(p.port_id.as_str())
                    .map(|q| port_differs(p, q))
                    .unwrap_or(false)
            })
            .count();

        if changed > 0 {
            changes.push(Change::SwitchPortsChanged {
                switch: before.name.clone(),
                ports: changed,
            });
        }
    }
    changes
}

fn port_differs(before: &SwitchPort, after: &SwitchPort) -> bool {
    before.name != after.name || before.port_type != after.port_type || before.vlan != after.vlan
}
