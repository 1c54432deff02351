//! LaunchDarkly API interaction module
//!
//! This module provides the authenticated JSON/HTTP plumbing used by the
//! resource handlers.
//!
//! # Module Structure
//!
//! - [`client`] - The [`LaunchDarklyApi`] capability trait and its concrete client
//! - [`error`] - Request error kinds
//! - [`http`] - Single-request execution with expected-status validation
//! - [`urls`] - Project and environment endpoint builders
//!
//! # Example
//!
//! ```ignore
//! use launchdarkly_provider::launchdarkly::{LaunchDarklyApi, LaunchDarklyClient, urls};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let client = LaunchDarklyClient::new("api-0000")?;
//!     let project = client.get(&urls::project_url(client.base_url(), "default"), &[200]).await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod http;
pub mod urls;

pub use client::{get_into, LaunchDarklyApi, LaunchDarklyClient};
pub use error::{describe_api_error, format_api_error, ApiError};
pub use http::LdHttpClient;
