//! ForemanApi trait for mocking
//!
//! This trait abstracts the ForemanClient to enable mocking in unit tests.
//! The concrete ForemanClient implements this trait, and tests can use mock
//! implementations.

use crate::error::ForemanError;
use crate::models::*;

/// Trait for Foreman API client operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait ForemanApi: Send + Sync {
    /// Get the base URL
    fn base_url(&self) -> &str;

    /// List all host entries
    async fn list_hosts(&self) -> Result<Vec<Host>, ForemanError>;

    /// List the network interfaces of one host
    async fn list_interfaces(&self, host_id: u64) -> Result<Vec<Interface>, ForemanError>;
}
