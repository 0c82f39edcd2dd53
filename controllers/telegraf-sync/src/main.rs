//! Telegraf sync
//!
//! One-shot reconciliation of Telegraf configuration against Foreman host
//! inventory:
//! - fetch every Foreman host together with its interfaces
//! - render the ping and dns_query input files from the host FQDNs
//! - patch the Telegraf config map keys and the matching deployment volume
//!   items when they drifted
//!
//! Unlike a watch-based controller this runs once and exits; schedule it
//! externally (e.g. as a CronJob).

mod config;
mod configmap;
mod error;
mod resource;
mod volume_item;

use crate::config::Config;
use crate::configmap::ConfigMapKey;
use crate::error::SyncError;
use crate::resource::K8sResource;
use crate::volume_item::{DeploymentVolumeItem, MountEntry};
use foreman_client::{ForemanClient, HostEntry};
use telegraf_config::{
    DnsQueryFormatter, DnsQueryOptions, InputFormatter, PingFormatter, PingOptions,
};
use tracing::{debug, info};

/// One rendered check: the config file name stem and its content.
struct Check {
    name: &'static str,
    rendered: String,
}

#[tokio::main]
async fn main() -> Result<(), SyncError> {
    tracing_subscriber::fmt::init();

    info!("Starting Telegraf sync");

    let config = Config::from_env()?;
    info!("Configuration:");
    info!("  Foreman URL: {}", config.foreman_url);
    info!("  Namespace: {}", config.namespace);
    info!("  Configmap: {}", config.configmap);

    let mut foreman = ForemanClient::new(
        config.foreman_url.clone(),
        config.foreman_user.clone(),
        config.foreman_password.clone(),
    )?;
    if let Some(search) = &config.foreman_search {
        foreman = foreman.with_search(search.clone());
    }

    let mut hosts = HostEntry::fetch_all(&foreman, config.fetch_concurrency).await?;
    // Fan-out completion order is unspecified; pin it so rendered documents
    // are identical across runs.
    hosts.sort_by(|a, b| a.name().cmp(b.name()));
    info!("Fetched {} hosts from Foreman", hosts.len());

    let checks = render_checks(&config, &hosts)?;

    let client = kube::Client::try_default().await?;

    for check in checks {
        let key = format!("{}.conf", check.name);
        let deployment = format!("{}-{}", config.deployment, check.name);

        let mut cm = ConfigMapKey::new(client.clone(), &config.namespace, &config.configmap, &key);
        sync_resource(&mut cm, &check.rendered).await?;

        let mut item = DeploymentVolumeItem::new(
            client.clone(),
            &config.namespace,
            &deployment,
            &config.volume,
            &config.configmap,
            &key,
        );
        let desired = MountEntry::new(key.clone(), format!("telegraf.d/{}", key));
        sync_resource(&mut item, &desired).await?;
    }

    info!("Sync complete");
    Ok(())
}

/// Render every enabled check for the given hosts.
fn render_checks(config: &Config, hosts: &[HostEntry]) -> Result<Vec<Check>, SyncError> {
    let mut checks = Vec::new();

    let ping = PingFormatter::new(PingOptions {
        count: config.ping_count,
        deadline: config.ping_deadline,
        interval: config.ping_interval,
        exclude: config.exclude_fqdns.clone(),
    })?;
    checks.push(Check {
        name: "ping",
        rendered: ping.format(hosts)?,
    });

    if config.dns_servers.is_empty() {
        info!("DNS_SERVERS not set, skipping the dns_query check");
    } else {
        let dns = DnsQueryFormatter::new(DnsQueryOptions {
            servers: config.dns_servers.clone(),
            timeout: config.dns_timeout,
            exclude: config.exclude_fqdns.clone(),
        })?;
        checks.push(Check {
            name: "dns",
            rendered: dns.format(hosts)?,
        });
    }

    Ok(checks)
}

/// Sync one resource, logging the drift diff before patching.
async fn sync_resource<R: K8sResource>(
    resource: &mut R,
    desired: &R::State,
) -> Result<(), SyncError> {
    if resource.in_sync(desired).await? {
        info!("{} already in sync", resource.description());
        return Ok(());
    }

    debug!(
        "{} drifted:\n{}",
        resource.description(),
        resource.diff(desired).await?
    );
    resource.sync(desired).await?;
    info!("Updated {}", resource.description());
    Ok(())
}
