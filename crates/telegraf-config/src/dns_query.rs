//! Telegraf configuration for forward DNS queries against host FQDNs

use crate::InputFormatter;
use crate::error::RenderError;
use crate::filter::{compile_patterns, monitored_fqdns};
use foreman_client::HostEntry;
use regex::Regex;
use serde::Serialize;

/// Options for the `[[inputs.dns_query]]` renderer
#[derive(Debug, Clone)]
pub struct DnsQueryOptions {
    /// Resolvers to query
    pub servers: Vec<String>,
    /// Query timeout in seconds
    pub timeout: u32,
    /// FQDNs matching any of these patterns are not monitored
    pub exclude: Vec<String>,
}

impl DnsQueryOptions {
    /// Options for the given resolvers, with default timeout
    pub fn new(servers: Vec<String>) -> Self {
        Self {
            servers,
            timeout: 5,
            exclude: Vec::new(),
        }
    }
}

/// Renders a Telegraf configuration that resolves host FQDNs
#[derive(Debug)]
pub struct DnsQueryFormatter {
    servers: Vec<String>,
    timeout: u32,
    exclude: Vec<Regex>,
}

#[derive(Serialize)]
struct Document {
    inputs: Inputs,
}

#[derive(Serialize)]
struct Inputs {
    dns_query: Vec<Entry>,
}

#[derive(Serialize)]
struct Entry {
    domains: Vec<String>,
    servers: Vec<String>,
    timeout: u32,
    record_type: &'static str,
}

impl DnsQueryFormatter {
    /// Build a formatter, compiling the exclusion patterns eagerly
    pub fn new(options: DnsQueryOptions) -> Result<Self, RenderError> {
        Ok(Self {
            servers: options.servers,
            timeout: options.timeout,
            exclude: compile_patterns(&options.exclude)?,
        })
    }
}

impl InputFormatter for DnsQueryFormatter {
    fn format(&self, hosts: &[HostEntry]) -> Result<String, RenderError> {
        let dns_query = hosts
            .iter()
            .filter_map(|host| {
                let domains = monitored_fqdns(host, &self.exclude);
                (!domains.is_empty()).then(|| Entry {
                    domains,
                    servers: self.servers.clone(),
                    timeout: self.timeout,
                    record_type: "A",
                })
            })
            .collect();

        Ok(toml::to_string(&Document {
            inputs: Inputs { dns_query },
        })?)
    }
}
