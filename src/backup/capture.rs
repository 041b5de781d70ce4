//! Live configuration capture
//!
//! Reads every category of a network through the Dashboard API and assembles
//! a [`Snapshot`]. A category that cannot be read gets a placeholder and an
//! entry in the [`CaptureReport`]; the capture itself still succeeds.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::api::{DashboardApi, Endpoint};
use crate::error::NetsnapError;
use crate::models::{
    Device, FirewallRuleSet, GroupPolicy, Snapshot, SnapshotMetadata, Ssid, SwitchDevice,
    SwitchPort, Vlan,
};

/// A category that could not be read
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFailure {
    pub category: String,
    pub message: String,
}

/// Categories that fell back to placeholders during a capture
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaptureReport {
    pub failures: Vec<CategoryFailure>,
}

impl CaptureReport {
    /// Whether every category was read
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A captured snapshot with its report
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    pub snapshot: Snapshot,
    pub report: CaptureReport,
}

/// Capture the full configuration of one network
pub fn capture<A: DashboardApi>(api: &A, network_id: &str, network_name: &str) -> CaptureOutcome {
    info!("Capturing configuration of {} ({})", network_name, network_id);

    let net = || network_id.to_string();
    let mut run = CaptureRun {
        api,
        report: CaptureReport::default(),
    };
    let mut snapshot = Snapshot::new(SnapshotMetadata::now(network_id, network_name));

    snapshot.network.details = run.free_form(Endpoint::Network { network_id: net() });
    snapshot.network.alerts = run.free_form(Endpoint::AlertSettings { network_id: net() });

    let appliance = &mut snapshot.appliance;
    appliance.vlans = run
        .read::<Vec<Vlan>>(Endpoint::ApplianceVlans { network_id: net() })
        .unwrap_or_default();
    appliance.firewall_l3 = run.read::<FirewallRuleSet>(Endpoint::FirewallL3Rules { network_id: net() });
    appliance.firewall_l7 = run.free_form(Endpoint::FirewallL7Rules { network_id: net() });
    appliance.traffic_shaping = run.free_form(Endpoint::TrafficShaping { network_id: net() });
    appliance.vpn_settings = run.free_form(Endpoint::SiteToSiteVpn { network_id: net() });
    appliance.content_filtering = run.free_form(Endpoint::ContentFiltering { network_id: net() });
    appliance.security_malware = run.malware(Endpoint::SecurityMalware { network_id: net() });
    appliance.port_forwarding = run.free_form(Endpoint::PortForwardingRules { network_id: net() });
    appliance.one_to_one_nat = run.free_form(Endpoint::OneToOneNatRules { network_id: net() });
    appliance.one_to_many_nat = run.free_form(Endpoint::OneToManyNatRules { network_id: net() });

    snapshot.switch.devices = run.switches(Endpoint::NetworkDevices { network_id: net() });

    snapshot.wireless.ssids = run
        .read::<Vec<Ssid>>(Endpoint::WirelessSsids { network_id: net() })
        .unwrap_or_default()
        .into_iter()
        .filter(|ssid| !ssid.is_unconfigured())
        .collect();
    snapshot.wireless.rf_profiles = run.free_form(Endpoint::RfProfiles { network_id: net() });

    snapshot.group_policies = run
        .read::<Vec<GroupPolicy>>(Endpoint::GroupPolicies { network_id: net() })
        .unwrap_or_default();

    snapshot.devices = run
        .read::<Vec<Device>>(Endpoint::NetworkDevices { network_id: net() })
        .unwrap_or_default();
    for device in &mut snapshot.devices {
        device.ensure_name();
    }

    let counts = snapshot.counts();
    info!(
        "Captured {} VLANs, {} firewall rules, {} SSIDs, {} group policies, {} switches",
        counts.vlans, counts.firewall_rules, counts.ssids, counts.group_policies, counts.switches
    );

    CaptureOutcome {
        snapshot,
        report: run.report,
    }
}

struct CaptureRun<'a, A> {
    api: &'a A,
    report: CaptureReport,
}

impl<A: DashboardApi> CaptureRun<'_, A> {
    /// Read and decode one category, recording a failure as `None`
    fn read<T: DeserializeOwned>(&mut self, endpoint: Endpoint) -> Option<T> {
        debug!("Reading {}", endpoint.label());
        match self.api.get_as::<T>(&endpoint) {
            Ok(value) => Some(value),
            Err(e) => {
                self.record_failure(endpoint.label(), &e);
                None
            }
        }
    }

    /// Read a category kept as free-form JSON, with a note on failure
    fn free_form(&mut self, endpoint: Endpoint) -> Value {
        let label = endpoint.label();
        self.read::<Value>(endpoint)
            .unwrap_or_else(|| unavailable(&label, self.last_message()))
    }

    /// Malware settings; the placeholder reports protection as disabled
    fn malware(&mut self, endpoint: Endpoint) -> Value {
        let label = endpoint.label();
        match self.read::<Value>(endpoint) {
            Some(value) => value,
            None => {
                let mut placeholder = unavailable(&label, self.last_message());
                placeholder["mode"] = json!("disabled");
                placeholder
            }
        }
    }

    /// Switches in the network with their ports
    fn switches(&mut self, devices: Endpoint) -> Vec<SwitchDevice> {
        let devices = self.read::<Vec<Device>>(devices).unwrap_or_default();

        let mut switches = Vec::new();
        for mut device in devices.into_iter().filter(Device::is_switch) {
            device.ensure_name();
            let ports = self
                .read::<Vec<SwitchPort>>(Endpoint::SwitchPorts {
                    serial: device.serial.clone(),
                })
                .unwrap_or_default();
            debug!("Switch {} has {} ports", device.name, ports.len());

            switches.push(SwitchDevice {
                serial: device.serial,
                name: device.name,
                model: device.model,
                ports,
            });
        }
        switches
    }

    fn record_failure(&mut self, category: String, error: &NetsnapError) {
        let message = error.detail();
        warn!("Could not capture {}: {}", category, message);
        self.report.failures.push(CategoryFailure { category, message });
    }

    fn last_message(&self) -> &str {
        self.report
            .failures
            .last()
            .map(|f| f.message.as_str())
            .unwrap_or_default()
    }
}

fn unavailable(category: &str, message: &str) -> Value {
    json!({ "note": format!("{} unavailable: {}", category, message) })
}
