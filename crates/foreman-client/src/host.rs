//! Host entries and their monitorable addresses
//!
//! A [`HostEntry`] pairs one Foreman host with its network interfaces and
//! derives the canonical FQDN list the renderers consume. Entries are
//! rebuilt fresh on every run; nothing is persisted between invocations.

use crate::error::ForemanError;
use crate::foreman_trait::ForemanApi;
use crate::models::{Host, Interface};
use futures::stream::{self, StreamExt, TryStreamExt};

/// Default number of interface queries in flight during
/// [`HostEntry::fetch_all`]. Bounds the load put on the Foreman instance.
pub const FETCH_CONCURRENCY: usize = 16;

/// A Foreman host entry, with associated interfaces
#[derive(Debug, Clone)]
pub struct HostEntry {
    host: Host,
    interfaces: Vec<Interface>,
}

impl HostEntry {
    /// Pair a host with its interfaces
    pub fn new(host: Host, interfaces: Vec<Interface>) -> Self {
        Self { host, interfaces }
    }

    /// Fetch all host definitions along with their interfaces.
    ///
    /// Interface queries fan out with at most `concurrency` requests in
    /// flight. The first failure aborts the whole build and names the host
    /// whose query failed; no partial result is returned. Completion order
    /// is unrelated to the inventory order, so callers needing a stable
    /// order must sort the result.
    pub async fn fetch_all<A>(api: &A, concurrency: usize) -> Result<Vec<HostEntry>, ForemanError>
    where
        A: ForemanApi + ?Sized,
    {
        let hosts = api.list_hosts().await?;

        stream::iter(hosts)
            .map(|host| async move {
                let interfaces = api.list_interfaces(host.id).await.map_err(|e| {
                    ForemanError::Interfaces {
                        host: host.name.clone(),
                        source: Box::new(e),
                    }
                })?;
                Ok(HostEntry::new(host, interfaces))
            })
            .buffer_unordered(concurrency.max(1))
            .try_collect()
            .await
    }

    /// The Foreman host entry
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// The host's interfaces, in inventory order
    pub fn interfaces(&self) -> &[Interface] {
        &self.interfaces
    }

    /// The host display name
    pub fn name(&self) -> &str {
        &self.host.name
    }

    /// Interfaces under configuration management
    pub fn managed_interfaces(&self) -> Vec<&Interface> {
        self.interfaces.iter().filter(|nic| nic.managed).collect()
    }

    /// All managed interfaces with both an IP and a MAC address
    pub fn configured_interfaces(&self) -> Vec<&Interface> {
        self.managed_interfaces()
            .into_iter()
            .filter(|nic| nic.ip.is_some() && nic.mac.is_some())
            .collect()
    }

    /// All A records assigned to interfaces of this host: the FQDNs of
    /// configured interfaces, non-empty, deduplicated, sorted ascending.
    pub fn fqdns(&self) -> Vec<String> {
        let mut fqdns: Vec<String> = self
            .configured_interfaces()
            .into_iter()
            .filter_map(|nic| nic.fqdn.as_deref())
            .filter(|fqdn| !fqdn.is_empty())
            .map(str::to_owned)
            .collect();
        fqdns.sort();
        fqdns.dedup();
        fqdns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockForemanClient;

    fn host(id: u64, name: &str) -> Host {
        Host {
            id,
            name: name.to_string(),
            ip: None,
            mac: None,
            domain_name: None,
            managed: true,
        }
    }

    fn nic(managed: bool, ip: Option<&str>, mac: Option<&str>, fqdn: Option<&str>) -> Interface {
        Interface {
            id: 0,
            identifier: None,
            managed,
            primary: false,
            ip: ip.map(str::to_owned),
            mac: mac.map(str::to_owned),
            fqdn: fqdn.map(str::to_owned),
        }
    }

    #[test]
    fn fqdns_are_sorted_and_deduplicated() {
        let entry = HostEntry::new(
            host(1, "node01"),
            vec![
                nic(true, Some("10.0.0.2"), Some("aa:bb:cc:dd:ee:02"), Some("b.example.com")),
                nic(true, Some("10.0.0.1"), Some("aa:bb:cc:dd:ee:01"), Some("a.example.com")),
                nic(true, Some("10.0.0.3"), Some("aa:bb:cc:dd:ee:03"), Some("a.example.com")),
            ],
        );

        assert_eq!(entry.fqdns(), vec!["a.example.com", "b.example.com"]);
    }

    #[test]
    fn fqdns_skip_unmanaged_and_unconfigured_interfaces() {
        let entry = HostEntry::new(
            host(1, "node01"),
            vec![
                nic(false, Some("10.0.0.1"), Some("aa:bb:cc:dd:ee:01"), Some("unmanaged.example.com")),
                nic(true, None, Some("aa:bb:cc:dd:ee:02"), Some("no-ip.example.com")),
                nic(true, Some("10.0.0.3"), None, Some("no-mac.example.com")),
                nic(true, Some("10.0.0.4"), Some("aa:bb:cc:dd:ee:04"), None),
                nic(true, Some("10.0.0.5"), Some("aa:bb:cc:dd:ee:05"), Some("")),
                nic(true, Some("10.0.0.6"), Some("aa:bb:cc:dd:ee:06"), Some("ok.example.com")),
            ],
        );

        assert_eq!(entry.fqdns(), vec!["ok.example.com"]);
    }

    #[test]
    fn fqdns_is_idempotent() {
        let entry = HostEntry::new(
            host(1, "node01"),
            vec![nic(true, Some("10.0.0.1"), Some("aa:bb:cc:dd:ee:01"), Some("a.example.com"))],
        );

        assert_eq!(entry.fqdns(), entry.fqdns());
    }

    #[tokio::test]
    async fn fetch_all_builds_an_entry_per_host() {
        let mock = MockForemanClient::new("https://foreman.example.com");
        mock.add_host(
            host(1, "node01"),
            vec![nic(true, Some("10.0.0.1"), Some("aa:bb:cc:dd:ee:01"), Some("node01.example.com"))],
        );
        mock.add_host(host(2, "node02"), vec![]);

        let mut entries = HostEntry::fetch_all(&mock, FETCH_CONCURRENCY).await.unwrap();
        // The fan-out makes no ordering promise.
        entries.sort_by(|a, b| a.name().cmp(b.name()));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name(), "node01");
        assert_eq!(entries[0].fqdns(), vec!["node01.example.com"]);
        assert!(entries[1].fqdns().is_empty());
    }

    #[tokio::test]
    async fn fetch_all_fails_fast_and_names_the_host() {
        let mock = MockForemanClient::new("https://foreman.example.com");
        mock.add_host(host(1, "node01"), vec![]);
        mock.add_host(host(2, "node02"), vec![]);
        mock.fail_interfaces_for(2);

        let err = HostEntry::fetch_all(&mock, FETCH_CONCURRENCY).await.unwrap_err();

        assert!(matches!(err, ForemanError::Interfaces { .. }));
        assert!(err.to_string().contains("node02"));
    }
}
