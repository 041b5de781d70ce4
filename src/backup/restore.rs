//! Backup restoration for netsnap
//!
//! Replays a snapshot onto a target network in a fixed order: VLANs, L3
//! firewall rules, SSIDs, group policies, switch ports. Every item is written
//! on its own; a failed item is recorded and the restore moves on. Nothing is
//! rolled back.

use std::collections::HashSet;
use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::api::{DashboardApi, Endpoint};
use crate::error::{NetsnapError, NetsnapResult};
use crate::models::{FirewallRule, GroupPolicy, Snapshot, SparseUpdate, Vlan};

/// Phrase the operator must type to allow a restore
pub const CONFIRMATION_PHRASE: &str = "RESTORE";

/// VLAN fields written back; a create also sends the id
pub const VLAN_FIELDS: &[&str] = &["name", "subnet", "applianceIp"];

/// SSID fields written back
pub const SSID_FIELDS: &[&str] = &[
    "name",
    "enabled",
    "authMode",
    "encryptionMode",
    "psk",
    "defaultVlanId",
    "ipAssignmentMode",
];

/// Group policy fields sent when creating a policy
pub const GROUP_POLICY_FIELDS: &[&str] =
    &["name", "scheduling", "bandwidth", "firewallAndTrafficShaping"];

/// Switch port fields written back
pub const SWITCH_PORT_FIELDS: &[&str] = &[
    "name",
    "enabled",
    "type",
    "vlan",
    "voiceVlan",
    "allowedVlans",
    "poeEnabled",
];

/// Proof that the operator typed the confirmation phrase
#[derive(Debug)]
pub struct Confirmation {
    _private: (),
}

impl Confirmation {
    /// Accepts exactly `RESTORE`; anything else is a refusal
    pub fn from_phrase(typed: &str) -> Option<Self> {
        (typed == CONFIRMATION_PHRASE).then_some(Self { _private: () })
    }
}

/// Restore steps, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreStep {
    Vlans,
    FirewallRules,
    Ssids,
    GroupPolicies,
    SwitchPorts,
}

impl RestoreStep {
    pub const ALL: [RestoreStep; 5] = [
        Self::Vlans,
        Self::FirewallRules,
        Self::Ssids,
        Self::GroupPolicies,
        Self::SwitchPorts,
    ];

    /// 1-based position of the step
    pub fn number(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0) + 1
    }
}

impl fmt::Display for RestoreStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Vlans => "VLANs",
            Self::FirewallRules => "Firewall rules",
            Self::Ssids => "Wireless SSIDs",
            Self::GroupPolicies => "Group policies",
            Self::SwitchPorts => "Switch ports",
        };
        f.write_str(label)
    }
}

/// An item that was deliberately not written
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedItem {
    pub item: String,
    pub reason: String,
}

/// An item whose write failed
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub item: String,
    pub message: String,
}

/// Outcome of one restore step
#[derive(Debug, Clone, PartialEq)]
pub struct StepReport {
    pub step: RestoreStep,
    /// Items written successfully
    pub succeeded: Vec<String>,
    pub skipped: Vec<SkippedItem>,
    pub failures: Vec<ItemFailure>,
}

impl StepReport {
    fn new(step: RestoreStep) -> Self {
        Self {
            step,
            succeeded: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
        }
    }

    fn success(&mut self, item: String) {
        debug!("Restored {}", item);
        self.succeeded.push(item);
    }

    fn skip(&mut self, item: String, reason: impl Into<String>) {
        let reason = reason.into();
        info!("Skipping {}: {}", item, reason);
        self.skipped.push(SkippedItem { item, reason });
    }

    fn failure(&mut self, item: String, error: &NetsnapError) {
        let message = error.detail();
        warn!("{}: {}", item, message);
        self.failures.push(ItemFailure { item, message });
    }

    /// Record the result of writing one item
    fn record<T>(&mut self, item: String, result: NetsnapResult<T>) {
        match result {
            Ok(_) => self.success(item),
            Err(e) => self.failure(item, &e),
        }
    }
}

/// Result of a restore run
#[derive(Debug, Clone, PartialEq)]
pub struct RestoreReport {
    /// Network the snapshot was written to
    pub network_id: String,
    /// One report per step, in execution order
    pub steps: Vec<StepReport>,
}

impl RestoreReport {
    /// Items written across all steps
    pub fn total_succeeded(&self) -> usize {
        self.steps.iter().map(|s| s.succeeded.len()).sum()
    }

    /// Items skipped across all steps
    pub fn total_skipped(&self) -> usize {
        self.steps.iter().map(|s| s.skipped.len()).sum()
    }

    /// Items that failed across all steps
    pub fn total_failed(&self) -> usize {
        self.steps.iter().map(|s| s.failures.len()).sum()
    }

    /// Whether every attempted write succeeded
    pub fn is_clean(&self) -> bool {
        self.total_failed() == 0
    }

    /// Report of one step
    pub fn step(&self, step: RestoreStep) -> Option<&StepReport> {
        self.steps.iter().find(|s| s.step == step)
    }

    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} item(s), skipped {}, failed {}",
            self.total_succeeded(),
            self.total_skipped(),
            self.total_failed()
        )
    }
}

/// Whether a restore went ahead
#[derive(Debug, Clone, PartialEq)]
pub enum RestoreOutcome {
    Completed(RestoreReport),
    /// The operator did not type the confirmation phrase; nothing was written
    Aborted,
}

/// Writes snapshots back to a network
pub struct Restorer<A> {
    api: A,
    network_id: String,
}

impl<A: DashboardApi> Restorer<A> {
    /// Create a restorer targeting `network_id`, which may differ from the
    /// network the snapshot was taken from
    pub fn new(api: A, network_id: impl Into<String>) -> Self {
        Self {
            api,
            network_id: network_id.into(),
        }
    }

    /// Target network id
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Restore if `typed` is the confirmation phrase
    pub fn confirm_and_restore(&self, snapshot: &Snapshot, typed: &str) -> RestoreOutcome {
        match Confirmation::from_phrase(typed) {
            Some(confirmation) => RestoreOutcome::Completed(self.restore(snapshot, confirmation)),
            None => {
                info!("Restore cancelled");
                RestoreOutcome::Aborted
            }
        }
    }

    /// Replay a snapshot onto the target network
    pub fn restore(&self, snapshot: &Snapshot, _confirmation: Confirmation) -> RestoreReport {
        info!(
            "Restoring {} ({}) onto {}",
            snapshot.metadata.network_name, snapshot.metadata.timestamp, self.network_id
        );

        let steps = RestoreStep::ALL
            .iter()
            .map(|step| {
                info!("[{}/{}] Restoring {}", step.number(), RestoreStep::ALL.len(), step);
                match step {
                    RestoreStep::Vlans => self.restore_vlans(snapshot),
                    RestoreStep::FirewallRules => self.restore_firewall_rules(snapshot),
                    RestoreStep::Ssids => self.restore_ssids(snapshot),
                    RestoreStep::GroupPolicies => self.restore_group_policies(snapshot),
                    RestoreStep::SwitchPorts => self.restore_switch_ports(snapshot),
                }
            })
            .collect();

        RestoreReport {
            network_id: self.network_id.clone(),
            steps,
        }
    }

    fn restore_vlans(&self, snapshot: &Snapshot) -> StepReport {
        let mut report = StepReport::new(RestoreStep::Vlans);

        let existing: HashSet<String> = self
            .read_existing::<Vlan>(Endpoint::ApplianceVlans {
                network_id: self.network_id.clone(),
            })
            .into_iter()
            .map(|v| v.id)
            .collect();

        for vlan in &snapshot.appliance.vlans {
            let item = format!("VLAN {}", vlan.id);
            let result = SparseUpdate::from_record(vlan, VLAN_FIELDS).and_then(|update| {
                if existing.contains(&vlan.id) {
                    self.api.put(
                        &Endpoint::ApplianceVlan {
                            network_id: self.network_id.clone(),
                            vlan_id: vlan.id.clone(),
                        },
                        &update.into_body(),
                    )
                } else {
                    self.api.post(
                        &Endpoint::ApplianceVlans {
                            network_id: self.network_id.clone(),
                        },
                        &update.with("id", vlan.id.clone()).into_body(),
                    )
                }
            });
            report.record(item, result);
        }

        report
    }

    fn restore_firewall_rules(&self, snapshot: &Snapshot) -> StepReport {
        let mut report = StepReport::new(RestoreStep::FirewallRules);

        let Some(rule_set) = &snapshot.appliance.firewall_l3 else {
            report.skip(
                "L3 firewall rules".to_string(),
                "not captured in this backup",
            );
            return report;
        };

        // The vendor appends its own default allow rule
        let (defaults, explicit): (Vec<&FirewallRule>, Vec<&FirewallRule>) =
            rule_set.rules.iter().partition(|r| r.is_default_allow());
        for rule in defaults {
            report.skip(
                format!("Rule '{}'", rule.comment.as_deref().unwrap_or_default()),
                "default allow rule is managed by the appliance",
            );
        }

        let count = explicit.len();
        let result = serde_json::to_value(&explicit)
            .map_err(NetsnapError::from)
            .and_then(|rules| {
                self.api.put(
                    &Endpoint::FirewallL3Rules {
                        network_id: self.network_id.clone(),
                    },
                    &json!({ "rules": rules }),
                )
            });
        report.record(format!("{} L3 firewall rule(s)", count), result);

        report
    }

    fn restore_ssids(&self, snapshot: &Snapshot) -> StepReport {
        let mut report = StepReport::new(RestoreStep::Ssids);

        for ssid in &snapshot.wireless.ssids {
            let item = format!("SSID {} ({})", ssid.number, ssid.name);
            let result = SparseUpdate::from_record(ssid, SSID_FIELDS).and_then(|update| {
                self.api.put(
                    &Endpoint::WirelessSsid {
                        network_id: self.network_id.clone(),
                        number: ssid.number,
                    },
                    &update.into_body(),
                )
            });
            report.record(item, result);
        }

        report
    }

    fn restore_group_policies(&self, snapshot: &Snapshot) -> StepReport {
        let mut report = StepReport::new(RestoreStep::GroupPolicies);

        let existing: HashSet<String> = self
            .read_existing::<GroupPolicy>(Endpoint::GroupPolicies {
                network_id: self.network_id.clone(),
            })
            .into_iter()
            .map(|p| p.name)
            .collect();

        for policy in &snapshot.group_policies {
            let item = format!("Policy '{}'", policy.name);
            if existing.contains(&policy.name) {
                report.skip(item, "already exists on the target");
                continue;
            }

            let result =
                SparseUpdate::from_record(policy, GROUP_POLICY_FIELDS).and_then(|update| {
                    self.api.post(
                        &Endpoint::GroupPolicies {
                            network_id: self.network_id.clone(),
                        },
                        &update.into_body(),
                    )
                });
            report.record(item, result);
        }

        report
    }

    fn restore_switch_ports(&self, snapshot: &Snapshot) -> StepReport {
        let mut report = StepReport::new(RestoreStep::SwitchPorts);

        for switch in &snapshot.switch.devices {
            debug!("Restoring {} port(s) of {}", switch.ports.len(), switch.serial);
            for port in &switch.ports {
                let item = format!("Port {}/{}", switch.serial, port.port_id);
                let update = match SparseUpdate::from_record(port, SWITCH_PORT_FIELDS) {
                    Ok(update) => update,
                    Err(e) => {
                        report.failure(item, &e);
                        continue;
                    }
                };
                if update.is_empty() {
                    report.skip(item, "no restorable fields");
                    continue;
                }

                let result = self.api.put(
                    &Endpoint::SwitchPort {
                        serial: switch.serial.clone(),
                        port_id: port.port_id.clone(),
                    },
                    &update.into_body(),
                );
                report.record(item, result);
            }
        }

        report
    }

    /// Records already on the target; a failed read counts as none
    fn read_existing<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Vec<T> {
        match self.api.get_as::<Vec<T>>(&endpoint) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Could not read existing {}, treating as none: {}",
                    endpoint.label(),
                    e.detail()
                );
                Vec::new()
            }
        }
    }
}
