//! Mock ForemanClient for unit testing
//!
//! Stores hosts and interfaces in memory and can be configured to fail the
//! interface query for selected hosts to exercise error paths, without
//! requiring a running Foreman instance.

use crate::error::ForemanError;
use crate::foreman_trait::ForemanApi;
use crate::models::{Host, Interface};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock ForemanClient for testing
#[derive(Clone)]
pub struct MockForemanClient {
    base_url: String,
    hosts: Arc<Mutex<Vec<Host>>>,
    interfaces: Arc<Mutex<HashMap<u64, Vec<Interface>>>>,
    fail_interfaces: Arc<Mutex<HashSet<u64>>>,
}

impl MockForemanClient {
    /// Create a new mock client
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            hosts: Arc::new(Mutex::new(Vec::new())),
            interfaces: Arc::new(Mutex::new(HashMap::new())),
            fail_interfaces: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Add a host and its interfaces to the mock store (for test setup)
    pub fn add_host(&self, host: Host, interfaces: Vec<Interface>) {
        self.interfaces.lock().unwrap().insert(host.id, interfaces);
        self.hosts.lock().unwrap().push(host);
    }

    /// Make `list_interfaces` fail for the given host (for test setup)
    pub fn fail_interfaces_for(&self, host_id: u64) {
        self.fail_interfaces.lock().unwrap().insert(host_id);
    }
}

#[async_trait::async_trait]
impl ForemanApi for MockForemanClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_hosts(&self) -> Result<Vec<Host>, ForemanError> {
        Ok(self.hosts.lock().unwrap().clone())
    }

    async fn list_interfaces(&self, host_id: u64) -> Result<Vec<Interface>, ForemanError> {
        if self.fail_interfaces.lock().unwrap().contains(&host_id) {
            return Err(ForemanError::Api(format!(
                "GET /api/hosts/{}/interfaces failed: 500 - simulated failure",
                host_id
            )));
        }
        Ok(self
            .interfaces
            .lock()
            .unwrap()
            .get(&host_id)
            .cloned()
            .unwrap_or_default())
    }
}
