//! LaunchDarkly project resource
//!
//! Maps the create/read/update/delete lifecycle onto the project and
//! environment endpoints. LaunchDarkly provisions default environments for
//! every new project; this resource does not manage environments, so create
//! swaps them for a single placeholder (a project cannot have zero
//! environments).

use super::data::ResourceData;
use super::registry::{get_schema, ResourceSchema};
use super::{Resource, ResourceError};
use crate::launchdarkly::{get_into, urls, ApiError, LaunchDarklyApi};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

pub const RESOURCE_TYPE: &str = "launchdarkly_project";

/// Key (and name) of the placeholder environment left on every project
pub const DUMMY_ENVIRONMENT_KEY: &str = "dummy";

const DUMMY_ENVIRONMENT_COLOR: &str = "000000";

const KEY_FORMAT: &str = "key of ASCII letters, digits, '.', '_' or '-' other than \".\" or \"..\"";

/// Project as returned by `GET /projects/{key}`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub key: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Environment {
    key: String,
}

#[derive(Debug, Deserialize)]
struct EnvironmentList {
    #[serde(default)]
    items: Vec<Environment>,
}

/// Reject keys that would not land in their own path segment
fn check_key(attribute: &str, key: &str) -> Result<(), ResourceError> {
    if urls::is_valid_key(key) {
        Ok(())
    } else {
        Err(ResourceError::InvalidAttribute {
            name: attribute.to_string(),
            expected: KEY_FORMAT.to_string(),
        })
    }
}

fn project_schema() -> Result<&'static ResourceSchema, ResourceError> {
    get_schema(RESOURCE_TYPE)
        .ok_or_else(|| ResourceError::UnknownResource(RESOURCE_TYPE.to_string()))
}

/// List the keys of every environment of a project
pub async fn environment_keys(
    api: &dyn LaunchDarklyApi,
    project_key: &str,
) -> Result<Vec<String>, ApiError> {
    let url = urls::environments_url(api.base_url(), project_key);
    let list: EnvironmentList = get_into(api, &url, &[200]).await?;

    Ok(list.items.into_iter().map(|env| env.key).collect())
}

/// Create the placeholder environment unless it already exists
pub async fn ensure_dummy_environment(
    api: &dyn LaunchDarklyApi,
    project_key: &str,
) -> Result<(), ApiError> {
    let url = urls::environment_url(api.base_url(), project_key, DUMMY_ENVIRONMENT_KEY);
    if api.get_status(&url).await? == 200 {
        tracing::debug!("Placeholder environment already present in {}", project_key);
        return Ok(());
    }

    let payload = json!({
        "name": DUMMY_ENVIRONMENT_KEY,
        "key": DUMMY_ENVIRONMENT_KEY,
        "color": DUMMY_ENVIRONMENT_COLOR,
    });
    api.post(
        &urls::environments_url(api.base_url(), project_key),
        &payload,
        &[201],
    )
    .await?;

    Ok(())
}

/// Handler for `launchdarkly_project`
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectResource;

#[async_trait]
impl Resource for ProjectResource {
    fn type_name(&self) -> &'static str {
        RESOURCE_TYPE
    }

    async fn create(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError> {
        let name = data.require_str("name")?;
        let key = data.require_str("key")?;
        check_key("key", &key)?;
        tracing::info!("Creating project {}", key);

        let payload = json!({ "name": name, "key": key });
        api.post(&urls::projects_url(api.base_url()), &payload, &[201])
            .await?;

        let default_environments = environment_keys(api, &key).await?;
        for env_key in &default_environments {
            check_key("environment key", env_key)?;
        }
        ensure_dummy_environment(api, &key).await?;

        for env_key in default_environments
            .iter()
            .filter(|k| k.as_str() != DUMMY_ENVIRONMENT_KEY)
        {
            tracing::debug!("Removing default environment {}/{}", key, env_key);
            api.delete(
                &urls::environment_url(api.base_url(), &key, env_key),
                &[204],
            )
            .await?;
        }

        data.set_id(key.as_str());
        data.set("name", name);
        data.set("key", key);

        Ok(())
    }

    async fn read(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError> {
        let key = data.require_str("key")?;
        check_key("key", &key)?;
        let url = urls::project_url(api.base_url(), &key);

        match get_into::<Project>(api, &url, &[200]).await {
            Ok(project) => {
                data.set("name", project.name);
                data.set("key", project.key);
                Ok(())
            }
            Err(err) if err.is_not_found() => {
                tracing::warn!("Project {} no longer exists, removing from state", key);
                data.set_id("");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn update(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError> {
        if !data.exists() {
            return Err(ResourceError::MissingId);
        }
        let schema = project_schema()?;
        data.require_str(&schema.id_attribute)?;
        schema.check_immutable(data)?;

        let id = data.id().to_string();
        check_key("key", &id)?;
        let name = data.require_str("name")?;

        let patch = json!([{
            "op": "replace",
            "path": "/name",
            "value": name,
        }]);
        api.patch(&urls::project_url(api.base_url(), &id), &patch, &[200])
            .await?;

        Ok(())
    }

    async fn delete(
        &self,
        data: &mut ResourceData,
        api: &dyn LaunchDarklyApi,
    ) -> Result<(), ResourceError> {
        if !data.exists() {
            return Err(ResourceError::MissingId);
        }
        check_key("key", data.id())?;

        api.delete(&urls::project_url(api.base_url(), data.id()), &[204, 404])
            .await?;
        data.set_id("");

        Ok(())
    }

    async fn import(
        &self,
        id: &str,
        api: &dyn LaunchDarklyApi,
    ) -> Result<ResourceData, ResourceError> {
        check_key("key", id)?;
        let mut data = ResourceData::new();
        data.set_id(id);
        data.set("key", id);

        self.read(&mut data, api).await?;
        if !data.exists() {
            return Err(ResourceError::NotFound(format!("project {}", id)));
        }

        Ok(data)
    }
}
