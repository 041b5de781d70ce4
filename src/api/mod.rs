//! Dashboard API boundary
//!
//! Everything netsnap reads from or writes to the live network goes through
//! [`DashboardApi`]. Capture and restore take the client as a parameter, so
//! tests drive them with an in-memory implementation.
//!
//! # Example
//!
//! ```rust,ignore
//! use netsnap::api::{DashboardClient, Endpoint, DashboardApi};
//! use netsnap::config::Settings;
//!
//! let client = DashboardClient::new(api_key, &Settings::default())?;
//! let vlans = client.get(&Endpoint::ApplianceVlans { network_id })?;
//! ```

mod client;
mod discovery;
mod endpoint;

#[cfg(test)]
pub(crate) mod fake;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{NetsnapError, NetsnapResult};

pub use client::DashboardClient;
pub use discovery::{list_networks, list_organizations, resolve_network, NetworkInfo, Organization};
pub use endpoint::Endpoint;

/// Read/write access to the Dashboard API
pub trait DashboardApi {
    /// Read a resource
    fn get(&self, endpoint: &Endpoint) -> NetsnapResult<Value>;

    /// Replace or update a resource
    fn put(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value>;

    /// Create a resource in a collection
    fn post(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value>;

    /// Read a resource and decode it
    fn get_as<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> NetsnapResult<T>
    where
        Self: Sized,
    {
        let value = self.get(endpoint)?;
        serde_json::from_value(value).map_err(|e| {
            NetsnapError::Json(format!("{}: unexpected response shape: {}", endpoint.label(), e))
        })
    }
}

impl<T: DashboardApi + ?Sized> DashboardApi for &T {
    fn get(&self, endpoint: &Endpoint) -> NetsnapResult<Value> {
        (**self).get(endpoint)
    }

    fn put(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value> {
        (**self).put(endpoint, body)
    }

    fn post(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value> {
        (**self).post(endpoint, body)
    }
}
