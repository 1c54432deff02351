//! Provider
//!
//! Owns the configured API client and the registered resource handlers, and
//! routes lifecycle calls by resource type name.

use crate::config::ProviderConfig;
use crate::launchdarkly::{LaunchDarklyApi, LaunchDarklyClient};
use crate::resource::{
    get_schema, ProjectResource, Resource, ResourceData, ResourceError, ResourceSchema,
};
use anyhow::Result;
use std::sync::Arc;

pub struct Provider {
    api: Arc<dyn LaunchDarklyApi>,
    resources: Vec<Box<dyn Resource>>,
}

impl Provider {
    /// Build a provider from resolved configuration
    pub fn configure(config: &ProviderConfig) -> Result<Self> {
        let client = LaunchDarklyClient::with_options(
            &config.access_token,
            &config.base_url,
            config.timeout,
        )?;
        tracing::info!("Provider configured against {}", config.base_url);

        Ok(Self::new(Arc::new(client)))
    }

    /// Build a provider on any api implementation
    pub fn new(api: Arc<dyn LaunchDarklyApi>) -> Self {
        Self {
            api,
            resources: vec![Box::new(ProjectResource)],
        }
    }

    pub fn api(&self) -> &dyn LaunchDarklyApi {
        self.api.as_ref()
    }

    pub fn resource(&self, resource_type: &str) -> Result<&dyn Resource, ResourceError> {
        self.resources
            .iter()
            .find(|r| r.type_name() == resource_type)
            .map(|r| r.as_ref())
            .ok_or_else(|| ResourceError::UnknownResource(resource_type.to_string()))
    }

    pub fn schema(&self, resource_type: &str) -> Result<&'static ResourceSchema, ResourceError> {
        self.resource(resource_type)?;
        get_schema(resource_type)
            .ok_or_else(|| ResourceError::UnknownResource(resource_type.to_string()))
    }

    pub async fn create(
        &self,
        resource_type: &str,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        self.schema(resource_type)?.validate(data)?;
        self.resource(resource_type)?.create(data, self.api()).await
    }

    pub async fn read(
        &self,
        resource_type: &str,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        self.resource(resource_type)?.read(data, self.api()).await
    }

    pub async fn update(
        &self,
        resource_type: &str,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        self.schema(resource_type)?.validate(data)?;
        self.resource(resource_type)?.update(data, self.api()).await
    }

    pub async fn delete(
        &self,
        resource_type: &str,
        data: &mut ResourceData,
    ) -> Result<(), ResourceError> {
        self.resource(resource_type)?.delete(data, self.api()).await
    }

    pub async fn import(
        &self,
        resource_type: &str,
        id: &str,
    ) -> Result<ResourceData, ResourceError> {
        self.resource(resource_type)?.import(id, self.api()).await
    }
}
