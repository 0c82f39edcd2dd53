//! Foreman API models
//!
//! These models match the Foreman API v2 serializers, trimmed to the fields
//! this crate consumes. Foreman returns many more fields per record; serde
//! ignores the rest on deserialize.

use serde::{Deserialize, Serialize};

/// Foreman API response wrapper (all index endpoints are paginated)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResults<T> {
    pub total: u64,
    pub subtotal: u64,
    pub page: u64,
    pub per_page: u64,
    pub results: Vec<T>,
}

/// Host entry from `/api/hosts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub managed: bool,
}

/// Network interface entry from `/api/hosts/:host_id/interfaces`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    pub id: u64,
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub managed: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub fqdn: Option<String>,
}
