//! HTTP utilities for LaunchDarkly REST API calls

use super::error::ApiError;
use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Content type sent with every request, bodyless ones included
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Maximum length of response body to log (to avoid logging sensitive data)
const MAX_LOG_BODY_LENGTH: usize = 200;

/// Sanitize response body for logging
/// Truncates long responses and strips control characters
fn sanitize_for_log(body: &str) -> String {
    let char_count = body.chars().count();
    let truncated = if char_count > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    };

    truncated.replace(|c: char| !c.is_ascii_graphic() && c != ' ', "")
}

/// Whether `status` satisfies the caller's expected status set.
/// An empty set accepts anything.
pub fn status_accepted(expected: &[u16], status: u16) -> bool {
    expected.is_empty() || expected.contains(&status)
}

/// HTTP client wrapper for LaunchDarkly API calls
///
/// Holds the access token and the connection pool. Cloning is cheap and
/// shares the pool.
#[derive(Clone)]
pub struct LdHttpClient {
    client: Client,
    access_token: String,
}

impl fmt::Debug for LdHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LdHttpClient")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl LdHttpClient {
    /// Create a new HTTP client with its own connection pool
    pub fn new(access_token: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            "launchdarkly-provider/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, access_token))
    }

    /// Wrap an existing transport, e.g. one shared with other providers
    pub fn with_client(client: Client, access_token: &str) -> Self {
        Self {
            client,
            access_token: access_token.to_string(),
        }
    }

    /// Send one request and validate its status.
    ///
    /// Returns the status code and the raw response body. When `expected` is
    /// non-empty and does not contain the actual status the call fails with
    /// [`ApiError::UnexpectedStatus`], which carries the body for diagnostics.
    pub async fn execute<B>(
        &self,
        method: Method,
        url: &str,
        body: Option<&B>,
        expected: &[u16],
    ) -> Result<(u16, Vec<u8>), ApiError>
    where
        B: Serialize + ?Sized,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(ApiError::Serialization)?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(AUTHORIZATION, self.access_token.as_str())
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        if let Some(payload) = payload {
            request = request.body(payload);
        }

        let response = request.send().await.map_err(|source| ApiError::Transport {
            method: method.to_string(),
            url: url.to_string(),
            source,
        })?;

        let status = response.status().as_u16();
        tracing::info!("{} {} returned HTTP status {}", method, url, status);

        let body = response.bytes().await.map_err(|source| ApiError::Read {
            method: method.to_string(),
            url: url.to_string(),
            source,
        })?;

        if !status_accepted(expected, status) {
            let body = String::from_utf8_lossy(&body).into_owned();
            tracing::warn!(
                "Unexpected status {} (expected {:?}) - {}",
                status,
                expected,
                sanitize_for_log(&body)
            );
            return Err(ApiError::UnexpectedStatus {
                method: method.to_string(),
                url: url.to_string(),
                status,
                body,
            });
        }

        Ok((status, body.to_vec()))
    }

    /// GET without status validation; only the status code is returned
    pub async fn get_status(&self, url: &str) -> Result<u16, ApiError> {
        let (status, _) = self.execute::<()>(Method::GET, url, None, &[]).await?;
        Ok(status)
    }

    /// GET and parse the body as generic JSON
    pub async fn get(&self, url: &str, expected: &[u16]) -> Result<Value, ApiError> {
        self.get_into(url, expected).await
    }

    /// GET and deserialize the body into `T`
    pub async fn get_into<T: DeserializeOwned>(
        &self,
        url: &str,
        expected: &[u16],
    ) -> Result<T, ApiError> {
        let (_, body) = self.execute::<()>(Method::GET, url, None, expected).await?;

        serde_json::from_slice(&body).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    /// POST a JSON body, returning the raw response bytes
    pub async fn post<B>(&self, url: &str, body: &B, expected: &[u16]) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let (_, response) = self.execute(Method::POST, url, Some(body), expected).await?;
        Ok(response)
    }

    /// PATCH a JSON body, returning the raw response bytes
    pub async fn patch<B>(&self, url: &str, body: &B, expected: &[u16]) -> Result<Vec<u8>, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let (_, response) = self.execute(Method::PATCH, url, Some(body), expected).await?;
        Ok(response)
    }

    pub async fn delete(&self, url: &str, expected: &[u16]) -> Result<(), ApiError> {
        self.execute::<()>(Method::DELETE, url, None, expected).await?;
        Ok(())
    }
}
