//! Foreman REST API Client
//!
//! A Rust client library for the Foreman REST API, covering the host and
//! interface queries needed to derive monitoring targets. Provides typed
//! models, a mockable client trait and the [`HostEntry`] aggregate with its
//! bounded-concurrency interface fan-out.
//!
//! # Example
//!
//! ```no_run
//! use foreman_client::{ForemanClient, HostEntry, FETCH_CONCURRENCY};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Create a client
//! let client = ForemanClient::new(
//!     "https://foreman.example.com".to_string(),
//!     "svc-telegraf".to_string(),
//!     "your-api-password".to_string(),
//! )?;
//!
//! // Fetch every host with its interfaces (16 queries in flight at most)
//! let entries = HostEntry::fetch_all(&client, FETCH_CONCURRENCY).await?;
//!
//! for entry in &entries {
//!     println!("{}: {:?}", entry.name(), entry.fqdns());
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
#[path = "trait.rs"]
pub mod foreman_trait;
pub mod host;
pub mod models;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::ForemanClient;
pub use error::ForemanError;
pub use foreman_trait::ForemanApi;
pub use host::{FETCH_CONCURRENCY, HostEntry};
pub use models::*;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockForemanClient;
