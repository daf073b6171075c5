//! Task definition domain model
//!
//! A task definition is a versioned document describing the containers a task
//! runs. Only the attributes the renderer reads or strips are typed; the rest
//! round-trip through `extra` untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A registered task definition as returned by the control plane
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    /// Server-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definition_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    /// Server-assigned revision number within the family
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<i64>,

    /// Server-assigned registration status (e.g. `ACTIVE`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Launch types the definition is compatible with, computed by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compatibilities: Option<Vec<String>>,

    /// Container-instance attributes the server derived from the definition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requires_attributes: Option<Vec<JsonValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_definitions: Option<Vec<ContainerDefinition>>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// A single container within a task definition
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<Vec<KeyValuePair>>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl ContainerDefinition {
    /// Creates a container definition with just a name and image
    pub fn new(name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            image: Some(image.into()),
            ..Default::default()
        }
    }

    /// The container name, treating an empty string as absent
    pub fn named(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }
}

/// A name/value pair, used for container environment variables
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValuePair {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl KeyValuePair {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_definition_round_trip_preserves_unknown_fields() {
        let raw = json!({
            "family": "web",
            "networkMode": "awsvpc",
            "cpu": "256",
            "containerDefinitions": [{
                "name": "web",
                "image": "nginx:1",
                "portMappings": [{ "containerPort": 80 }],
                "environment": [{ "name": "A", "value": "1" }]
            }]
        });

        let td: TaskDefinition = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(td.extra.get("networkMode"), Some(&json!("awsvpc")));

        let containers = td.container_definitions.as_ref().unwrap();
        assert_eq!(containers[0].named(), Some("web"));
        assert!(containers[0].extra.contains_key("portMappings"));

        assert_eq!(serde_json::to_value(&td).unwrap(), raw);
    }

    #[test]
    fn test_missing_collections_stay_absent() {
        let td: TaskDefinition = serde_json::from_value(json!({ "family": "x" })).unwrap();
        assert!(td.container_definitions.is_none());

        let container: ContainerDefinition =
            serde_json::from_value(json!({ "name": "" })).unwrap();
        assert!(container.environment.is_none());
        assert_eq!(container.named(), None);
    }
}
