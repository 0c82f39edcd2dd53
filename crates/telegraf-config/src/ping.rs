//! Telegraf configuration for pinging host FQDNs

use crate::InputFormatter;
use crate::error::RenderError;
use crate::filter::{compile_patterns, monitored_fqdns};
use foreman_client::HostEntry;
use regex::Regex;
use serde::Serialize;

/// Options for the `[[inputs.ping]]` renderer
#[derive(Debug, Clone)]
pub struct PingOptions {
    /// Number of pings sent per gather interval
    pub count: u32,
    /// Ping deadline in seconds (`ping -w`)
    pub deadline: u32,
    /// Interval between pings in seconds (`ping -i`)
    pub interval: u32,
    /// FQDNs matching any of these patterns are not monitored
    pub exclude: Vec<String>,
}

impl Default for PingOptions {
    fn default() -> Self {
        Self {
            count: 5,
            deadline: 5,
            interval: 1,
            exclude: Vec::new(),
        }
    }
}

/// Renders a Telegraf configuration that pings host FQDNs
#[derive(Debug)]
pub struct PingFormatter {
    count: u32,
    deadline: u32,
    interval: u32,
    exclude: Vec<Regex>,
}

#[derive(Serialize)]
struct Document {
    inputs: Inputs,
}

#[derive(Serialize)]
struct Inputs {
    ping: Vec<Entry>,
}

#[derive(Serialize)]
struct Entry {
    count: u32,
    deadline: u32,
    interval: u32,
    urls: Vec<String>,
}

impl PingFormatter {
    /// Build a formatter, compiling the exclusion patterns eagerly
    pub fn new(options: PingOptions) -> Result<Self, RenderError> {
        Ok(Self {
            count: options.count,
            deadline: options.deadline,
            interval: options.interval,
            exclude: compile_patterns(&options.exclude)?,
        })
    }
}

impl InputFormatter for PingFormatter {
    fn format(&self, hosts: &[HostEntry]) -> Result<String, RenderError> {
        let ping = hosts
            .iter()
            .filter_map(|host| {
                let urls = monitored_fqdns(host, &self.exclude);
                (!urls.is_empty()).then(|| Entry {
                    count: self.count,
                    deadline: self.deadline,
                    interval: self.interval,
                    urls,
                })
            })
            .collect();

        Ok(toml::to_string(&Document {
            inputs: Inputs { ping },
        })?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::entry;

    #[test]
    fn one_entry_per_host_with_fqdns() {
        let hosts = vec![
            entry("node01", &["a.example.com", "b.example.com"]),
            entry("node02", &["c.example.com"]),
        ];
        let formatter = PingFormatter::new(PingOptions::default()).unwrap();

        let output = formatter.format(&hosts).unwrap();
        let doc: toml::Value = toml::from_str(&output).unwrap();

        let ping = doc["inputs"]["ping"].as_array().unwrap();
        assert_eq!(ping.len(), 2);
        assert_eq!(ping[0]["count"].as_integer(), Some(5));
        assert_eq!(ping[0]["deadline"].as_integer(), Some(5));
        assert_eq!(ping[0]["interval"].as_integer(), Some(1));
        assert_eq!(
            ping[0]["urls"].as_array().unwrap().len(),
            2,
            "first host carries both FQDNs"
        );
        assert_eq!(ping[1]["urls"][0].as_str(), Some("c.example.com"));
    }

    #[test]
    fn configured_options_are_emitted() {
        let hosts = vec![entry("node01", &["a.example.com"])];
        let formatter = PingFormatter::new(PingOptions {
            count: 3,
            deadline: 10,
            interval: 2,
            exclude: Vec::new(),
        })
        .unwrap();

        let output = formatter.format(&hosts).unwrap();
        let doc: toml::Value = toml::from_str(&output).unwrap();

        let ping = doc["inputs"]["ping"].as_array().unwrap();
        assert_eq!(ping[0]["count"].as_integer(), Some(3));
        assert_eq!(ping[0]["deadline"].as_integer(), Some(10));
        assert_eq!(ping[0]["interval"].as_integer(), Some(2));
    }

    #[test]
    fn excluded_fqdns_are_dropped() {
        let hosts = vec![entry("node01", &["a.example.com", "b.example.com"])];
        let formatter = PingFormatter::new(PingOptions {
            exclude: vec!["^a\\.".to_string()],
            ..PingOptions::default()
        })
        .unwrap();

        let output = formatter.format(&hosts).unwrap();
        let doc: toml::Value = toml::from_str(&output).unwrap();

        let urls = doc["inputs"]["ping"][0]["urls"].as_array().unwrap();
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].as_str(), Some("b.example.com"));
    }

    #[test]
    fn fully_excluded_host_is_omitted() {
        let hosts = vec![
            entry("node01", &["a.example.com"]),
            entry("node02", &["keep.example.com"]),
        ];
        let formatter = PingFormatter::new(PingOptions {
            exclude: vec!["^a\\.".to_string()],
            ..PingOptions::default()
        })
        .unwrap();

        let output = formatter.format(&hosts).unwrap();
        let doc: toml::Value = toml::from_str(&output).unwrap();

        let ping = doc["inputs"]["ping"].as_array().unwrap();
        assert_eq!(ping.len(), 1, "node01 must not leave an empty placeholder");
        assert_eq!(ping[0]["urls"][0].as_str(), Some("keep.example.com"));
    }

    #[test]
    fn output_is_byte_stable() {
        let hosts = vec![
            entry("node01", &["a.example.com", "b.example.com"]),
            entry("node02", &["c.example.com"]),
        ];
        let formatter = PingFormatter::new(PingOptions::default()).unwrap();

        assert_eq!(
            formatter.format(&hosts).unwrap(),
            formatter.format(&hosts).unwrap()
        );
    }

    #[test]
    fn malformed_exclusion_pattern_fails_construction() {
        let result = PingFormatter::new(PingOptions {
            exclude: vec!["(".to_string()],
            ..PingOptions::default()
        });

        assert!(matches!(result, Err(RenderError::Pattern(_))));
    }
}
