//! Resource abstraction layer
//!
//! A resource handler maps the lifecycle calls of an orchestrator
//! (create, read, update, delete, import) onto LaunchDarkly API calls. It is
//! handed the resource's [`ResourceData`] and anything implementing
//! [`LaunchDarklyApi`]; it never sees a concrete client type.
//!
//! # Architecture
//!
//! - [`data`] - The per-instance attribute record handlers mutate
//! - [`registry`] - Resource schemas loaded from embedded JSON
//! - [`project`] - The `launchdarkly_project` handler
//!
//! # Example
//!
//! ```ignore
//! use launchdarkly_provider::resource::{ProjectResource, Resource, ResourceData};
//!
//! async fn create(api: &dyn LaunchDarklyApi) -> Result<(), ResourceError> {
//!     let mut data =
//!         ResourceData::from_attributes([("name", json!("Foo")), ("key", json!("foo"))]);
//!     ProjectResource.create(&mut data, api).await?;
//!     assert_eq!(data.id(), "foo");
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod project;
pub mod registry;

use crate::launchdarkly::{ApiError, LaunchDarklyApi};
use async_trait::async_trait;
use thiserror::Error;

pub use data::ResourceData;
pub use project::ProjectResource;
pub use registry::{
    get_all_resource_types, get_schema, AttributeDef, AttributeType, ResourceSchema,
};

/// Errors surfaced by resource handlers
#[derive(Error, Debug)]
pub enum ResourceError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Missing required attribute \"{0}\"")]
    MissingAttribute(String),

    #[error("Attribute \"{name}\" must be a {expected}")]
    InvalidAttribute { name: String, expected: String },

    #[error(
        "Attribute \"{name}\" cannot be changed in place (\"{from}\" -> \"{to}\"); \
         the resource must be replaced"
    )]
    ImmutableAttribute { name: String, from: String, to: String },

    #[error("Resource has no identifier; it has not been created")]
    MissingId,

    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    #[error("Cannot import {0}: it does not exist")]
    NotFound(String),
}

/// Lifecycle handler for one resource type.
///
/// Every operation is independently invocable; sequencing is the caller's
/// job. Handlers issue their requests one after another and do not retry.
#[async_trait]
pub trait Resource: Send + Sync {
    /// Type name as used in configuration, e.g. `launchdarkly_project`
    fn type_name(&self) -> &'static str;

    /// Create the remote object and set the identifier
    async fn create(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError>;

    /// Refresh attributes from the remote object.
    /// A vanished object clears the identifier instead of failing.
    async fn read(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError>;

    async fn update(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError>;

    async fn delete(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError>;

    /// Adopt an existing remote object by identifier
    async fn import(
        &self,
        id: &str,
        api: &dyn LaunchDarklyApi,
    ) -> Result<ResourceData, ResourceError>;
}
