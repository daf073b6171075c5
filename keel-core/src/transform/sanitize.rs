//! Task definition sanitizing
//!
//! The register API rejects attributes the server computes itself, so they
//! have to be stripped before a fetched definition is submitted again.

use crate::domain::task_definition::TaskDefinition;

/// Wire names of the attributes removed by [`sanitize`]
pub const SERVER_ASSIGNED_FIELDS: [&str; 5] = [
    "compatibilities",
    "requiresAttributes",
    "status",
    "revision",
    "taskDefinitionArn",
];

/// Removes every server-assigned attribute from `task_definition`
pub fn sanitize(task_definition: &mut TaskDefinition) {
    task_definition.compatibilities = None;
    task_definition.requires_attributes = None;
    task_definition.status = None;
    task_definition.revision = None;
    task_definition.task_definition_arn = None;

    for field in SERVER_ASSIGNED_FIELDS {
        task_definition.extra.remove(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sanitize_removes_exactly_server_assigned_fields() {
        let mut td: TaskDefinition = serde_json::from_value(json!({
            "taskDefinitionArn": "arn:aws:ecs:us-east-1:123:task-definition/web:5",
            "family": "web",
            "revision": 5,
            "status": "ACTIVE",
            "compatibilities": ["EC2", "FARGATE"],
            "requiresAttributes": [{ "name": "com.amazonaws.ecs.capability.logging-driver.awslogs" }],
            "networkMode": "awsvpc",
            "containerDefinitions": [{ "name": "web", "image": "nginx" }]
        }))
        .unwrap();

        sanitize(&mut td);

        assert_eq!(
            serde_json::to_value(&td).unwrap(),
            json!({
                "family": "web",
                "networkMode": "awsvpc",
                "containerDefinitions": [{ "name": "web", "image": "nginx" }]
            })
        );
    }

    #[test]
    fn test_sanitize_without_server_fields_is_noop() {
        let mut td = TaskDefinition {
            family: Some("web".to_string()),
            ..Default::default()
        };
        let before = td.clone();

        sanitize(&mut td);
        assert_eq!(td, before);
    }

    #[test]
    fn test_sanitize_clears_pass_through_copies() {
        let mut td = TaskDefinition::default();
        td.extra.insert("status".to_string(), json!("INACTIVE"));

        sanitize(&mut td);
        assert!(td.extra.is_empty());
    }
}
