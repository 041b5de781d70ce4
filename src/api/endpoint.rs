//! Dashboard API resources used by netsnap

use std::fmt;

/// One Dashboard API resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Organizations,
    OrganizationNetworks { organization_id: String },
    Network { network_id: String },
    AlertSettings { network_id: String },
    ApplianceVlans { network_id: String },
    ApplianceVlan { network_id: String, vlan_id: String },
    FirewallL3Rules { network_id: String },
    FirewallL7Rules { network_id: String },
    TrafficShaping { network_id: String },
    SiteToSiteVpn { network_id: String },
    ContentFiltering { network_id: String },
    SecurityMalware { network_id: String },
    PortForwardingRules { network_id: String },
    OneToOneNatRules { network_id: String },
    OneToManyNatRules { network_id: String },
    NetworkDevices { network_id: String },
    SwitchPorts { serial: String },
    SwitchPort { serial: String, port_id: String },
    WirelessSsids { network_id: String },
    WirelessSsid { network_id: String, number: u32 },
    RfProfiles { network_id: String },
    GroupPolicies { network_id: String },
}

impl Endpoint {
    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Self::Organizations => "/organizations".to_string(),
            Self::OrganizationNetworks { organization_id } => {
                format!("/organizations/{}/networks", organization_id)
            }
            Self::Network { network_id } => format!("/networks/{}", network_id),
            Self::AlertSettings { network_id } => {
                format!("/networks/{}/alerts/settings", network_id)
            }
            Self::ApplianceVlans { network_id } => {
                format!("/networks/{}/appliance/vlans", network_id)
            }
            Self::ApplianceVlan {
                network_id,
                vlan_id,
            } => format!("/networks/{}/appliance/vlans/{}", network_id, vlan_id),
            Self::FirewallL3Rules { network_id } => {
                format!("/networks/{}/appliance/firewall/l3FirewallRules", network_id)
            }
            Self::FirewallL7Rules { network_id } => {
                format!("/networks/{}/appliance/firewall/l7FirewallRules", network_id)
            }
            Self::TrafficShaping { network_id } => {
                format!("/networks/{}/appliance/trafficShaping", network_id)
            }
            Self::SiteToSiteVpn { network_id } => {
                format!("/networks/{}/appliance/vpn/siteToSiteVpn", network_id)
            }
            Self::ContentFiltering { network_id } => {
                format!("/networks/{}/appliance/contentFiltering", network_id)
            }
            Self::SecurityMalware { network_id } => {
                format!("/networks/{}/appliance/security/malware", network_id)
            }
            Self::PortForwardingRules { network_id } => format!(
                "/networks/{}/appliance/firewall/portForwardingRules",
                network_id
            ),
            Self::OneToOneNatRules { network_id } => {
                format!("/networks/{}/appliance/firewall/oneToOneNatRules", network_id)
            }
            Self::OneToManyNatRules { network_id } => {
                format!("/networks/{}/appliance/firewall/oneToManyNatRules", network_id)
            }
            Self::NetworkDevices { network_id } => format!("/networks/{}/devices", network_id),
            Self::SwitchPorts { serial } => format!("/devices/{}/switch/ports", serial),
            Self::SwitchPort { serial, port_id } => {
                format!("/devices/{}/switch/ports/{}", serial, port_id)
            }
            Self::WirelessSsids { network_id } => {
                format!("/networks/{}/wireless/ssids", network_id)
            }
            Self::WirelessSsid { network_id, number } => {
                format!("/networks/{}/wireless/ssids/{}", network_id, number)
            }
            Self::RfProfiles { network_id } => {
                format!("/networks/{}/wireless/rfProfiles", network_id)
            }
            Self::GroupPolicies { network_id } => {
                format!("/networks/{}/groupPolicies", network_id)
            }
        }
    }

    /// Human-readable name used as error context
    pub fn label(&self) -> String {
        match self {
            Self::Organizations => "Organizations".to_string(),
            Self::OrganizationNetworks { .. } => "Organization networks".to_string(),
            Self::Network { .. } => "Network settings".to_string(),
            Self::AlertSettings { .. } => "Alert settings".to_string(),
            Self::ApplianceVlans { .. } => "VLANs".to_string(),
            Self::ApplianceVlan { vlan_id, .. } => format!("VLAN {}", vlan_id),
            Self::FirewallL3Rules { .. } => "L3 firewall rules".to_string(),
            Self::FirewallL7Rules { .. } => "L7 firewall rules".to_string(),
            Self::TrafficShaping { .. } => "Traffic shaping".to_string(),
            Self::SiteToSiteVpn { .. } => "Site-to-site VPN".to_string(),
            Self::ContentFiltering { .. } => "Content filtering".to_string(),
            Self::SecurityMalware { .. } => "Malware protection".to_string(),
            Self::PortForwardingRules { .. } => "Port forwarding rules".to_string(),
            Self::OneToOneNatRules { .. } => "1:1 NAT rules".to_string(),
            Self::OneToManyNatRules { .. } => "1:many NAT rules".to_string(),
            Self::NetworkDevices { .. } => "Devices".to_string(),
            Self::SwitchPorts { serial } => format!("Switch ports of {}", serial),
            Self::SwitchPort { serial, port_id } => format!("Port {}/{}", serial, port_id),
            Self::WirelessSsids { .. } => "Wireless SSIDs".to_string(),
            Self::WirelessSsid { number, .. } => format!("SSID {}", number),
            Self::RfProfiles { .. } => "RF profiles".to_string(),
            Self::GroupPolicies { .. } => "Group policies".to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
