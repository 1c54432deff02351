//! Resource Data
//!
//! The locally tracked attributes of one resource instance plus its
//! identifier. Handlers mutate it after each successful remote operation;
//! whoever drives the lifecycle owns and persists it.

use super::ResourceError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    /// Empty until the resource exists remotely; cleared when it is gone
    #[serde(default)]
    id: String,
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

impl ResourceData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_attributes<K, I>(attributes: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        Self {
            id: String::new(),
            attributes: attributes.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Whether the resource is tracked as existing
    pub fn exists(&self) -> bool {
        !self.id.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(|v| v.as_str())
    }

    /// Owned string attribute, failing when it is absent or not a string
    pub fn require_str(&self, name: &str) -> Result<String, ResourceError> {
        match self.get(name) {
            None | Some(Value::Null) => Err(ResourceError::MissingAttribute(name.to_string())),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(ResourceError::InvalidAttribute {
                name: name.to_string(),
                expected: "string".to_string(),
            }),
        }
    }

    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.attributes.insert(name.to_string(), value.into());
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// Load resource data from a JSON state file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse state file {}", path.display()))
    }

    /// Save resource data to a JSON state file
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write state file {}", path.display()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_data_does_not_exist() {
        let data = ResourceData::new();
        assert!(!data.exists());
        assert_eq!(data.id(), "");
    }

    #[test]
    fn require_str_distinguishes_missing_and_mistyped() {
        let data = ResourceData::from_attributes([("name", json!("Foo")), ("key", json!(7))]);
        assert_eq!(data.require_str("name").unwrap(), "Foo");
        assert!(matches!(
            data.require_str("key"),
            Err(ResourceError::InvalidAttribute { .. })
        ));
        assert!(matches!(
            data.require_str("missing"),
            Err(ResourceError::MissingAttribute(_))
        ));
    }

    #[test]
    fn state_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("state.json");

        let mut data =
            ResourceData::from_attributes([("name", json!("Foo")), ("key", json!("foo"))]);
        data.set_id("foo");
        data.save(&path).unwrap();

        assert_eq!(ResourceData::load(&path).unwrap(), data);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResourceData::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read state file"));
    }
}
