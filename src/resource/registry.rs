//! Resource Registry - Load resource schemas from JSON
//!
//! Resource schemas are embedded at compile time and looked up by resource
//! type name (e.g. `launchdarkly_project`).

use super::data::ResourceData;
use super::ResourceError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Embedded schema JSON files (compiled into the binary)
const SCHEMA_FILES: &[&str] = &[include_str!("../resources/launchdarkly.json")];

/// Attribute value type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttributeType {
    String,
}

impl AttributeType {
    fn matches(self, value: &Value) -> bool {
        match self {
            AttributeType::String => value.is_string(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            AttributeType::String => "string",
        }
    }
}

/// Attribute definition from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributeDef {
    #[serde(rename = "type")]
    pub kind: AttributeType,
    #[serde(default)]
    pub required: bool,
    /// Changing this attribute replaces the resource instead of updating it
    #[serde(default)]
    pub force_new: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Resource schema from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSchema {
    pub display_name: String,
    /// Attribute whose value becomes the resource identifier
    pub id_attribute: String,
    pub attributes: BTreeMap<String, AttributeDef>,
}

impl ResourceSchema {
    /// Check that required attributes are present and every known
    /// attribute has the declared type
    pub fn validate(&self, data: &ResourceData) -> Result<(), ResourceError> {
        for (name, def) in &self.attributes {
            match data.get(name) {
                None | Some(Value::Null) if def.required => {
                    return Err(ResourceError::MissingAttribute(name.clone()));
                }
                None | Some(Value::Null) => {}
                Some(value) if !def.kind.matches(value) => {
                    return Err(ResourceError::InvalidAttribute {
                        name: name.clone(),
                        expected: def.kind.as_str().to_string(),
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Attributes that cannot be updated in place
    pub fn force_new_attributes(&self) -> impl Iterator<Item = &str> {
        self.attributes
            .iter()
            .filter(|(_, def)| def.force_new)
            .map(|(name, _)| name.as_str())
    }

    /// Reject in-place changes to force-new attributes of an existing
    /// resource. The identifier is the only prior value tracked, so the
    /// comparison covers the id attribute.
    pub fn check_immutable(&self, data: &ResourceData) -> Result<(), ResourceError> {
        if !data.exists() {
            return Ok(());
        }

        for name in self.force_new_attributes() {
            if name != self.id_attribute {
                continue;
            }
            if let Some(current) = data.get_str(name) {
                if current != data.id() {
                    return Err(ResourceError::ImmutableAttribute {
                        name: name.to_string(),
                        from: data.id().to_string(),
                        to: current.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Root structure of resources/*.json
#[derive(Debug, Clone, Deserialize, Default)]
struct SchemaConfig {
    #[serde(default)]
    resources: BTreeMap<String, ResourceSchema>,
}

static REGISTRY: OnceLock<BTreeMap<String, ResourceSchema>> = OnceLock::new();

/// Get the schema registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static BTreeMap<String, ResourceSchema> {
    REGISTRY.get_or_init(|| {
        let mut resources = BTreeMap::new();

        for content in SCHEMA_FILES {
            let partial: SchemaConfig = serde_json::from_str(content)
                .unwrap_or_else(|e| panic!("Failed to parse embedded schema JSON: {}", e));
            resources.extend(partial.resources);
        }

        resources
    })
}

/// Get a resource schema by type name
pub fn get_schema(resource_type: &str) -> Option<&'static ResourceSchema> {
    get_registry().get(resource_type)
}

/// Get all registered resource type names
pub fn get_all_resource_types() -> Vec<&'static str> {
    get_registry().keys().map(|s| s.as_str()).collect()
}
