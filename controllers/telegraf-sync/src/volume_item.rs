//! A Telegraf deployment volume definition matching the Telegraf config map.
//!
//! Config maps cannot contain nested directory entries; to populate the
//! `/etc/telegraf/telegraf.d/` directory the deployment volume definition
//! mounts additional files at explicit subpaths.
//!
//! When a config map volume uses explicit paths (such as those under
//! `telegraf.d`), the kubelet materializes them as symlinks, which Telegraf
//! skips by default. The consuming deployment must run
//! `telegraf --config-directory /etc/telegraf/telegraf.d/` (trailing slash)
//! so the directory itself is scanned.

use crate::error::SyncError;
use crate::resource::K8sResource;
use async_trait::async_trait;
use k8s_openapi::api::apps::v1::Deployment;
use kube::Client;
use kube::api::{Api, Patch, PatchParams};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

/// Default file mode for projected config map entries (0644).
const DEFAULT_MODE: i32 = 0o644;

/// One config-map key projected to a file path inside a mounted volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountEntry {
    /// Config map key to project
    pub key: String,
    /// File path inside the mounted volume
    pub path: String,
}

impl MountEntry {
    /// A `key` → `path` projection
    pub fn new(key: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
        }
    }
}

/// The `telegraf.conf` entry that must stay mounted whatever else is.
fn baseline() -> MountEntry {
    MountEntry::new("telegraf.conf", "telegraf.conf")
}

/// Full item list for a desired entry: the baseline plus the entry, sorted
/// by path so repeated syncs produce identical patch bodies.
fn items_for(desired: &MountEntry) -> Vec<MountEntry> {
    let mut items = vec![baseline(), desired.clone()];
    items.sort_by(|a, b| a.path.cmp(&b.path));
    items
}

/// One config-map volume item of one deployment's pod template.
pub struct DeploymentVolumeItem {
    api: Api<Deployment>,
    ns: String,
    deployment: String,
    volume: String,
    configmap: String,
    key: String,
    current: Option<Option<MountEntry>>,
}

impl DeploymentVolumeItem {
    /// Track the item projecting `key` from the config map `configmap`
    /// inside the volume `volume` of deployment `deployment`.
    pub fn new(
        client: Client,
        ns: &str,
        deployment: &str,
        volume: &str,
        configmap: &str,
        key: &str,
    ) -> Self {
        Self {
            api: Api::namespaced(client, ns),
            ns: ns.to_string(),
            deployment: deployment.to_string(),
            volume: volume.to_string(),
            configmap: configmap.to_string(),
            key: key.to_string(),
            current: None,
        }
    }
}

#[async_trait]
impl K8sResource for DeploymentVolumeItem {
    type State = MountEntry;

    fn description(&self) -> String {
        format!(
            "{} deploy/{} volume/{}/cm/{} key={}",
            self.ns, self.deployment, self.volume, self.configmap, self.key
        )
    }

    fn cached(&self) -> Option<&Option<MountEntry>> {
        self.current.as_ref()
    }

    async fn fetch(&mut self) -> Result<Option<MountEntry>, SyncError> {
        let deploy = self
            .api
            .get(&self.deployment)
            .await
            .map_err(|e| SyncError::for_resource(e, self.description()))?;

        let entry = deploy
            .spec
            .and_then(|spec| spec.template.spec)
            .and_then(|pod| pod.volumes)
            .and_then(|volumes| volumes.into_iter().find(|v| v.name == self.volume))
            .and_then(|volume| volume.config_map)
            .and_then(|cm| cm.items)
            .and_then(|items| items.into_iter().find(|item| item.key == self.key))
            .map(|item| MountEntry::new(item.key, item.path));

        self.current = Some(entry.clone());
        Ok(entry)
    }

    async fn apply(&mut self, desired: &MountEntry) -> Result<(), SyncError> {
        debug!("Patching {}", self.description());

        let patch = json!({
            "spec": {
                "template": {
                    "spec": {
                        "volumes": [
                            {
                                "name": &self.volume,
                                "configMap": {
                                    "name": &self.configmap,
                                    "defaultMode": DEFAULT_MODE,
                                    "items": items_for(desired),
                                }
                            }
                        ]
                    }
                }
            }
        });

        // Strategic merge: the volumes list merges on `name`, so other
        // volumes on the pod template survive the patch.
        self.api
            .patch(
                &self.deployment,
                &PatchParams::default(),
                &Patch::Strategic(&patch),
            )
            .await
            .map_err(|e| SyncError::for_resource(e, self.description()))?;

        // Refresh the current state
        self.fetch().await?;
        Ok(())
    }

    fn render(state: &MountEntry) -> String {
        format!("{} -> {}", state.key, state.path)
    }
}
