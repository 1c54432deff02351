//! LaunchDarkly Client
//!
//! The capability interface resource handlers depend on, and the concrete
//! client that backs it with [`LdHttpClient`].

use super::error::ApiError;
use super::http::LdHttpClient;
use super::urls::{self, DEFAULT_BASE_URL};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Requests a resource handler may issue against the LaunchDarkly API.
///
/// Every method is a single attempt. `expected` is the set of acceptable
/// statuses; an empty slice accepts any status.
#[async_trait]
pub trait LaunchDarklyApi: Send + Sync {
    /// Root that endpoint URLs are built from
    fn base_url(&self) -> &str;

    async fn get_status(&self, url: &str) -> Result<u16, ApiError>;

    async fn get(&self, url: &str, expected: &[u16]) -> Result<Value, ApiError>;

    async fn post(
        &self,
        url: &str,
        body: &Value,
        expected: &[u16],
    ) -> Result<Vec<u8>, ApiError>;

    async fn patch(
        &self,
        url: &str,
        body: &Value,
        expected: &[u16],
    ) -> Result<Vec<u8>, ApiError>;

    async fn delete(&self, url: &str, expected: &[u16]) -> Result<(), ApiError>;
}

/// GET through any [`LaunchDarklyApi`] and deserialize into `T`
pub async fn get_into<T: DeserializeOwned>(
    api: &dyn LaunchDarklyApi,
    url: &str,
    expected: &[u16],
) -> Result<T, ApiError> {
    let value = api.get(url, expected).await?;
    serde_json::from_value(value).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Main LaunchDarkly client
#[derive(Clone, Debug)]
pub struct LaunchDarklyClient {
    pub http: LdHttpClient,
    base_url: String,
}

impl LaunchDarklyClient {
    /// Create a client against the public API with a fresh connection pool
    pub fn new(access_token: &str) -> Result<Self> {
        Self::with_options(access_token, DEFAULT_BASE_URL, None)
    }

    /// Create a client against `base_url`, optionally bounding each request
    pub fn with_options(
        access_token: &str,
        base_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let http = LdHttpClient::new(access_token, timeout)?;
        Self::with_http_client(http, base_url)
    }

    /// Build on an injected transport
    pub fn with_http_client(http: LdHttpClient, base_url: &str) -> Result<Self> {
        url::Url::parse(base_url)
            .with_context(|| format!("Invalid LaunchDarkly base URL: {}", base_url))?;

        Ok(Self {
            http,
            base_url: urls::normalize_base_url(base_url),
        })
    }
}

#[async_trait]
impl LaunchDarklyApi for LaunchDarklyClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_status(&self, url: &str) -> Result<u16, ApiError> {
        self.http.get_status(url).await
    }

    async fn get(&self, url: &str, expected: &[u16]) -> Result<Value, ApiError> {
        self.http.get(url, expected).await
    }

    async fn post(
        &self,
        url: &str,
        body: &Value,
        expected: &[u16],
    ) -> Result<Vec<u8>, ApiError> {
        self.http.post(url, body, expected).await
    }

    async fn patch(
        &self,
        url: &str,
        body: &Value,
        expected: &[u16],
    ) -> Result<Vec<u8>, ApiError> {
        self.http.patch(url, body, expected).await
    }

    async fn delete(&self, url: &str, expected: &[u16]) -> Result<(), ApiError> {
        self.http.delete(url, expected).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_base_url() {
        let http = LdHttpClient::with_client(reqwest::Client::new(), "token");
        assert!(LaunchDarklyClient::with_http_client(http, "not a url").is_err());
    }

    #[test]
    fn normalizes_base_url() {
        let http = LdHttpClient::with_client(reqwest::Client::new(), "token");
        let client = LaunchDarklyClient::with_http_client(http, "http://localhost:8080/api/v2/")
            .expect("valid url");
        assert_eq!(client.base_url(), "http://localhost:8080/api/v2");
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync + Clone>() {}
        assert_send_sync::<LaunchDarklyClient>();
    }
}
