//! Environment-driven configuration for a sync run.

use crate::error::SyncError;
use std::env;
use std::str::FromStr;
use telegraf_config::PingOptions;

/// Runtime configuration, read from the environment.
///
/// Per-check deployments are named `<deployment>-<check>` (e.g.
/// `telegraf-ping`), matching the Helm chart layout.
#[derive(Debug, Clone)]
pub struct Config {
    /// Foreman base URL (`FOREMAN_URL`, required)
    pub foreman_url: String,
    /// Foreman API user (`FOREMAN_USER`, required)
    pub foreman_user: String,
    /// Foreman API password (`FOREMAN_PASSWORD`, required)
    pub foreman_password: String,
    /// Optional Foreman search query restricting the host list
    /// (`FOREMAN_SEARCH`)
    pub foreman_search: Option<String>,
    /// Interface queries in flight at once (`FETCH_CONCURRENCY`, default 16)
    pub fetch_concurrency: usize,
    /// Kubernetes namespace (`NAMESPACE`, default `telegraf`)
    pub namespace: String,
    /// Config map holding the rendered files (`CONFIGMAP`, default
    /// `telegraf`)
    pub configmap: String,
    /// Deployment name prefix (`DEPLOYMENT`, default `telegraf`)
    pub deployment: String,
    /// Volume name inside the pod templates (`VOLUME`, default `config`)
    pub volume: String,
    /// FQDN exclusion patterns, comma separated (`EXCLUDE_FQDNS`)
    pub exclude_fqdns: Vec<String>,
    /// Resolvers for the dns_query check, comma separated (`DNS_SERVERS`);
    /// the check is skipped when unset
    pub dns_servers: Vec<String>,
    /// dns_query timeout in seconds (`DNS_TIMEOUT`, default 5)
    pub dns_timeout: u32,
    /// Pings per gather interval (`PING_COUNT`, default 5)
    pub ping_count: u32,
    /// Ping deadline in seconds (`PING_DEADLINE`, default 5)
    pub ping_deadline: u32,
    /// Interval between pings in seconds (`PING_INTERVAL`, default 1)
    pub ping_interval: u32,
}

impl Config {
    /// Load the configuration from environment variables.
    pub fn from_env() -> Result<Self, SyncError> {
        let ping = PingOptions::default();

        Ok(Self {
            foreman_url: required("FOREMAN_URL")?,
            foreman_user: required("FOREMAN_USER")?,
            foreman_password: required("FOREMAN_PASSWORD")?,
            foreman_search: env::var("FOREMAN_SEARCH").ok(),
            fetch_concurrency: numeric("FETCH_CONCURRENCY", foreman_client::FETCH_CONCURRENCY)?,
            namespace: with_default("NAMESPACE", "telegraf"),
            configmap: with_default("CONFIGMAP", "telegraf"),
            deployment: with_default("DEPLOYMENT", "telegraf"),
            volume: with_default("VOLUME", "config"),
            exclude_fqdns: list("EXCLUDE_FQDNS"),
            dns_servers: list("DNS_SERVERS"),
            dns_timeout: numeric("DNS_TIMEOUT", 5)?,
            ping_count: numeric("PING_COUNT", ping.count)?,
            ping_deadline: numeric("PING_DEADLINE", ping.deadline)?,
            ping_interval: numeric("PING_INTERVAL", ping.interval)?,
        })
    }
}

fn required(name: &str) -> Result<String, SyncError> {
    env::var(name).map_err(|_| {
        SyncError::InvalidConfig(format!("{} environment variable is required", name))
    })
}

fn with_default(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn list(name: &str) -> Vec<String> {
    env::var(name)
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|entry| !entry.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn numeric<T: FromStr + Copy>(name: &str, default: T) -> Result<T, SyncError> {
    match env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| {
            SyncError::InvalidConfig(format!("{} must be numeric, got {:?}", name, raw))
        }),
        Err(_) => Ok(default),
    }
}
