//! The config map holding rendered Telegraf config files.

use crate::error::SyncError;
use crate::resource::K8sResource;
use async_trait::async_trait;
use k8s_openapi::api::core::v1::ConfigMap;
use kube::Client;
use kube::api::{Api, Patch, PatchParams};
use serde_json::json;
use tracing::debug;

/// One key of a namespaced config map.
pub struct ConfigMapKey {
    api: Api<ConfigMap>,
    ns: String,
    name: String,
    key: String,
    current: Option<Option<String>>,
}

impl ConfigMapKey {
    /// Track `key` inside the config map `name` in namespace `ns`.
    pub fn new(client: Client, ns: &str, name: &str, key: &str) -> Self {
        Self {
            api: Api::namespaced(client, ns),
            ns: ns.to_string(),
            name: name.to_string(),
            key: key.to_string(),
            current: None,
        }
    }
}

#[async_trait]
impl K8sResource for ConfigMapKey {
    type State = String;

    fn description(&self) -> String {
        format!("ns={} configmap/{} key={}", self.ns, self.name, self.key)
    }

    fn cached(&self) -> Option<&Option<String>> {
        self.current.as_ref()
    }

    async fn fetch(&mut self) -> Result<Option<String>, SyncError> {
        let cm = self
            .api
            .get(&self.name)
            .await
            .map_err(|e| SyncError::for_resource(e, self.description()))?;

        let value = cm.data.as_ref().and_then(|data| data.get(&self.key)).cloned();
        self.current = Some(value.clone());
        Ok(value)
    }

    async fn apply(&mut self, desired: &String) -> Result<(), SyncError> {
        debug!("Patching {}", self.description());

        let mut data = serde_json::Map::new();
        data.insert(self.key.clone(), serde_json::Value::String(desired.clone()));
        let patch = json!({ "data": data });

        self.api
            .patch(&self.name, &PatchParams::default(), &Patch::Merge(&patch))
            .await
            .map_err(|e| SyncError::for_resource(e, self.description()))?;

        // Refresh the current state
        self.fetch().await?;
        Ok(())
    }

    fn render(state: &String) -> String {
        state.clone()
    }
}
