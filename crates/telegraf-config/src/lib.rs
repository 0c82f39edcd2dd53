//! Telegraf input renderers
//!
//! Formatters take a list of Foreman host entries and generate a Telegraf
//! configuration file monitoring those hosts. Each formatter renders one
//! input plugin section; the output is deterministic for identical input so
//! the resource layer can diff it byte for byte.

pub mod dns_query;
pub mod error;
mod filter;
pub mod ping;

pub use dns_query::{DnsQueryFormatter, DnsQueryOptions};
pub use error::RenderError;
pub use ping::{PingFormatter, PingOptions};

use foreman_client::HostEntry;

/// Rendering contract shared by all input formatters
pub trait InputFormatter {
    /// Render the Telegraf input section covering the given hosts.
    ///
    /// Hosts whose every FQDN is excluded contribute no entry at all.
    fn format(&self, hosts: &[HostEntry]) -> Result<String, RenderError>;
}
