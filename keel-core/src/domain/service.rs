//! Service domain model

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// A long-running service on a cluster
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster_arn: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Identifier (ARN or `family:revision`) of the task definition the
    /// service is currently running
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_definition: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl Service {
    /// The current task definition reference, treating an empty string as absent
    pub fn current_task_definition(&self) -> Option<&str> {
        self.task_definition.as_deref().filter(|s| !s.is_empty())
    }
}
