//! Foreman client errors

use thiserror::Error;

/// Errors that can occur when interacting with the Foreman API
#[derive(Debug, Error)]
pub enum ForemanError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Foreman API returned an error
    #[error("Foreman API error: {0}")]
    Api(String),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Interface query for a single host failed during an aggregate build
    #[error("failed to fetch interfaces for host {host}: {source}")]
    Interfaces {
        /// Name of the host whose interface query failed
        host: String,
        /// Underlying client error
        source: Box<ForemanError>,
    },
}
