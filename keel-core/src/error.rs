//! Error types for rendering a task definition

use thiserror::Error;

/// Terminal failures of a render run
///
/// Each variant aborts the run at the point it is detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployError {
    /// The control plane returned no service for the requested name
    #[error("no services found for {service} in cluster {cluster}")]
    ServiceNotFound { cluster: String, service: String },

    /// The service carries no reference to a task definition
    #[error("service {service} has no current task definition")]
    MissingTaskDefinitionReference { service: String },

    /// The task definition lookup returned no document
    #[error("no task definition returned for {reference}")]
    MissingTaskDefinition { reference: String },

    /// The selection policy found no eligible container definition
    #[error("no container definition found")]
    NoContainerFound,
}
