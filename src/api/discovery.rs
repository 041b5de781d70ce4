//! Organization and network lookup

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DashboardApi, Endpoint};
use crate::config::Settings;
use crate::error::{NetsnapError, NetsnapResult};

/// An organization visible to the API key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    pub id: String,
    pub name: String,
}

/// A network inside an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub product_types: Vec<String>,
}

/// All organizations the API key can see
pub fn list_organizations<A: DashboardApi>(api: &A) -> NetsnapResult<Vec<Organization>> {
    api.get_as(&Endpoint::Organizations)
}

/// All networks of one organization
pub fn list_networks<A: DashboardApi>(api: &A, organization_id: &str) -> NetsnapResult<Vec<NetworkInfo>> {
    api.get_as(&Endpoint::OrganizationNetworks {
        organization_id: organization_id.to_string(),
    })
}

/// Pick the network a backup should target
///
/// An explicit id (argument first, then settings) is looked up directly.
/// Otherwise the configured organization (or the first one) is searched for
/// the first network whose name contains `settings.network_name_filter`,
/// ignoring case.
pub fn resolve_network<A: DashboardApi>(
    api: &A,
    settings: &Settings,
    network_id: Option<&str>,
) -> NetsnapResult<NetworkInfo> {
    if let Some(id) = network_id.or(settings.network_id.as_deref()) {
        return api.get_as(&Endpoint::Network {
            network_id: id.to_string(),
        });
    }

    let organization_id = match &settings.organization_id {
        Some(id) => id.clone(),
        None => list_organizations(api)?
            .into_iter()
            .next()
            .map(|org| {
                info!("Using organization {} ({})", org.name, org.id);
                org.id
            })
            .ok_or_else(|| NetsnapError::NotFound {
                entity_type: "Organization",
                identifier: "any".to_string(),
            })?,
    };

    let filter = settings.network_name_filter.to_lowercase();
    list_networks(api, &organization_id)?
        .into_iter()
        .find(|n| n.name.to_lowercase().contains(&filter))
        .ok_or_else(|| {
            NetsnapError::network_not_found(format!(
                "name containing '{}' in organization {}",
                settings.network_name_filter, organization_id
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeDashboard;
    use serde_json::json;

    fn dashboard() -> FakeDashboard {
        FakeDashboard::new()
            .with(
                Endpoint::Organizations,
                json!([{"id": "549236", "name": "DevNet Sandbox"}]),
            )
            .with(
                Endpoint::OrganizationNetworks {
                    organization_id: "549236".into(),
                },
                json!([
                    {"id": "L_1", "name": "HQ", "productTypes": ["appliance"]},
                    {"id": "L_2", "name": "Chicago Branch Office", "productTypes": ["appliance", "switch"]}
                ]),
            )
    }

    #[test]
    fn test_resolve_by_name_filter() {
        let network = resolve_network(&dashboard(), &Settings::default(), None).unwrap();
        assert_eq!(network.id, "L_2");
        assert_eq!(network.product_types.len(), 2);
    }

    #[test]
    fn test_resolve_by_explicit_id() {
        let api = dashboard().with(
            Endpoint::Network {
                network_id: "L_1".into(),
            },
            json!({"id": "L_1", "name": "HQ", "organizationId": "549236"}),
        );
        let network = resolve_network(&api, &Settings::default(), Some("L_1")).unwrap();
        assert_eq!(network.name, "HQ");
        assert_eq!(network.organization_id.as_deref(), Some("549236"));
    }

    #[test]
    fn test_no_matching_network() {
        let settings = Settings {
            network_name_filter: "warehouse".into(),
            ..Settings::default()
        };
        let err = resolve_network(&dashboard(), &settings, None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_enumeration_failure_is_fatal() {
        let api = FakeDashboard::new().failing(Endpoint::Organizations, 500);
        let err = resolve_network(&api, &Settings::default(), None).unwrap_err();
        assert!(err.is_remote());
    }
}
