//! LaunchDarkly provider core
//!
//! An authenticated JSON/HTTP client for the LaunchDarkly REST API and the
//! `launchdarkly_project` resource handler built on it.
//!
//! - [`launchdarkly`] - Client, request execution, endpoint URLs
//! - [`resource`] - Resource data, schemas and lifecycle handlers
//! - [`provider`] - Dispatch of lifecycle calls by resource type
//! - [`config`] - Persistent configuration and settings resolution

pub mod config;
pub mod launchdarkly;
pub mod provider;
pub mod resource;

pub use config::{Config, ProviderConfig};
pub use provider::Provider;
