//! Foreman API client
//!
//! Implements the Foreman REST API client for host and interface queries.
//! Based on the Foreman API v2 structure: /api/hosts and
//! /api/hosts/:host_id/interfaces

use crate::error::ForemanError;
use crate::foreman_trait::ForemanApi;
use crate::models::*;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Page size requested from list endpoints.
const PER_PAGE: u64 = 200;

/// Foreman API client
pub struct ForemanClient {
    client: Client,
    base_url: String,
    username: String,
    password: String,
    search: Option<String>,
}

impl ForemanClient {
    /// Create a new Foreman client
    ///
    /// # Arguments
    /// * `base_url` - Foreman base URL (e.g., "https://foreman.example.com")
    /// * `username` - API user
    /// * `password` - API password or personal access token
    pub fn new(
        base_url: String,
        username: String,
        password: String,
    ) -> Result<Self, ForemanError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ForemanError::Http)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            username,
            password,
            search: None,
        })
    }

    /// Restrict `list_hosts` to a Foreman search query
    /// (e.g. `"hostgroup = monitored"`).
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch all pages of a paginated index endpoint.
    ///
    /// Foreman pages by number rather than by continuation link, so this
    /// walks `page=1..` until a short page or the reported subtotal is
    /// reached.
    async fn fetch_all_pages<T: for<'de> serde::Deserialize<'de>>(
        &self,
        path: &str,
        filters: &[(&str, &str)],
    ) -> Result<Vec<T>, ForemanError> {
        let mut all_results = Vec::new();
        let mut page = 1u64;

        loop {
            let mut query: Vec<String> = filters
                .iter()
                .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
                .collect();
            query.push(format!("page={}", page));
            query.push(format!("per_page={}", PER_PAGE));
            let url = format!("{}{}?{}", self.base_url, path, query.join("&"));
            debug!("Fetching page: {}", url);

            let response = self
                .client
                .get(&url)
                .basic_auth(&self.username, Some(&self.password))
                .header("Accept", "application/json")
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                return Err(ForemanError::Api(format!(
                    "GET {} failed: {} - {}",
                    path, status, body
                )));
            }

            // Try to deserialize, but capture the response body for better error messages
            let response_text = response.text().await?;
            let results: PaginatedResults<T> =
                serde_json::from_str(&response_text).map_err(|e| {
                    ForemanError::Api(format!(
                        "error decoding response body: {} - Response (first 500 chars): {}",
                        e,
                        response_text.chars().take(500).collect::<String>()
                    ))
                })?;

            let fetched = results.results.len() as u64;
            all_results.extend(results.results);

            if fetched < PER_PAGE || all_results.len() as u64 >= results.subtotal {
                break;
            }
            page += 1;
        }

        Ok(all_results)
    }
}

#[async_trait::async_trait]
impl ForemanApi for ForemanClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_hosts(&self) -> Result<Vec<Host>, ForemanError> {
        debug!("Listing hosts (search: {:?})", self.search);

        let filters: Vec<(&str, &str)> = match self.search.as_deref() {
            Some(search) => vec![("search", search)],
            None => Vec::new(),
        };
        self.fetch_all_pages("/api/hosts", &filters).await
    }

    async fn list_interfaces(&self, host_id: u64) -> Result<Vec<Interface>, ForemanError> {
        debug!("Listing interfaces for host {}", host_id);

        let path = format!("/api/hosts/{}/interfaces", host_id);
        self.fetch_all_pages(&path, &[]).await
    }
}
