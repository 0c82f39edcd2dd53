//! Sync-specific error types.
//!
//! This module defines the error taxonomy for a sync run. Transport
//! failures, missing targets and invalid configuration stay distinguishable
//! so the caller can decide which ones are fatal.

use foreman_client::ForemanError;
use kube::Error as KubeError;
use telegraf_config::RenderError;
use thiserror::Error;

/// Errors that can occur while syncing Telegraf configuration.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Kubernetes API error while handling a specific resource
    #[error("Kubernetes error for {description}: {source}")]
    Api {
        /// Identity of the resource being handled
        description: String,
        /// Underlying Kubernetes client error
        #[source]
        source: KubeError,
    },

    /// Kubernetes client error outside any one resource
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Target object is absent from the cluster
    #[error("not found: {0}")]
    NotFound(String),

    /// Foreman API error
    #[error("Foreman error: {0}")]
    Foreman(#[from] ForemanError),

    /// Renderer error
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl SyncError {
    /// Classify a Kubernetes error for a given resource: a 404 becomes
    /// [`SyncError::NotFound`], everything else keeps the resource
    /// description attached.
    pub(crate) fn for_resource(err: KubeError, description: String) -> Self {
        match err {
            KubeError::Api(ref response) if response.code == 404 => {
                SyncError::NotFound(description)
            }
            err => SyncError::Api {
                description,
                source: err,
            },
        }
    }
}
