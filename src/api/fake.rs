//! In-memory Dashboard API for tests

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;

use super::{DashboardApi, Endpoint};
use crate::error::{NetsnapError, NetsnapResult};

/// A write the code under test sent
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RecordedWrite {
    pub method: &'static str,
    pub path: String,
    pub body: Value,
}

/// Canned responses keyed by path; unknown paths answer 404
#[derive(Default)]
pub(crate) struct FakeDashboard {
    responses: HashMap<String, Value>,
    failures: HashMap<String, u16>,
    writes: RefCell<Vec<RecordedWrite>>,
}

impl FakeDashboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer reads of `endpoint` with `value`
    pub fn with(mut self, endpoint: Endpoint, value: Value) -> Self {
        self.responses.insert(endpoint.path(), value);
        self
    }

    /// Fail every request to `endpoint` with HTTP `status`
    pub fn failing(mut self, endpoint: Endpoint, status: u16) -> Self {
        self.failures.insert(endpoint.path(), status);
        self
    }

    /// Writes received so far, in order
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.borrow().clone()
    }

    /// Writes received for one endpoint
    pub fn writes_to(&self, endpoint: &Endpoint) -> Vec<RecordedWrite> {
        let path = endpoint.path();
        self.writes
            .borrow()
            .iter()
            .filter(|w| w.path == path)
            .cloned()
            .collect()
    }

    fn check_failure(&self, endpoint: &Endpoint) -> NetsnapResult<()> {
        match self.failures.get(&endpoint.path()) {
            Some(status) => Err(NetsnapError::remote(
                endpoint.label(),
                Some(*status),
                format!("HTTP {}: simulated failure", status),
            )),
            None => Ok(()),
        }
    }

    fn record(&self, method: &'static str, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value> {
        self.check_failure(endpoint)?;
        self.writes.borrow_mut().push(RecordedWrite {
            method,
            path: endpoint.path(),
            body: body.clone(),
        });
        Ok(body.clone())
    }
}

impl DashboardApi for FakeDashboard {
    fn get(&self, endpoint: &Endpoint) -> NetsnapResult<Value> {
        self.check_failure(endpoint)?;
        self.responses.get(&endpoint.path()).cloned().ok_or_else(|| {
            NetsnapError::remote(endpoint.label(), Some(404), "HTTP 404: Not Found")
        })
    }

    fn put(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value> {
        self.record("PUT", endpoint, body)
    }

    fn post(&self, endpoint: &Endpoint, body: &Value) -> NetsnapResult<Value> {
        self.record("POST", endpoint, body)
    }
}
