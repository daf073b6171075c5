//! Render service
//!
//! Fetches the task definition a service is running, points the selected
//! container at the new image, refreshes its build identity variables,
//! strips server-assigned attributes, and writes the result to disk:
//!
//! 1. describe the service
//! 2. read its current task definition reference
//! 3. describe that task definition
//! 4. select the target container
//! 5. replace its image
//! 6. merge `GIT_REVISION`/`DOCKER_BUILD` into its environment
//! 7. sanitize
//! 8. write `task-definition-{revision}.json`
//! 9. report outputs

use std::path::PathBuf;

use anyhow::{Context, Result};
use keel_client::{ControlPlane, CredentialSource};
use keel_core::DeployError;
use keel_core::domain::task_definition::TaskDefinition;
use keel_core::transform::{
    BuildLabel, SelectionPolicy, merge_environment, sanitize, select_container,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::actions::OutputSink;
use crate::config::{Config, HostEnvironment};

/// Which outputs a run reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputSet {
    /// Output file path, all container names, and the selected container name
    All,
    /// Output file path only
    TaskDefinitionOnly,
}

/// Deployment configuration a render runs under
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeployProfile {
    /// How the target container is chosen
    pub policy: SelectionPolicy,
    /// How credentials for the control plane are obtained
    pub credentials: CredentialSource,
    /// Which outputs are reported
    pub outputs: OutputSet,
}

impl DeployProfile {
    /// Multi-container tasks: first named container, ambient credentials,
    /// every output
    pub fn multi_container() -> Self {
        Self {
            policy: SelectionPolicy::FirstNamed,
            credentials: CredentialSource::Environment,
            outputs: OutputSet::All,
        }
    }

    /// Single-container tasks: the sole container, a named credential
    /// profile, output path only
    pub fn single_container(profile: impl Into<String>) -> Self {
        Self {
            policy: SelectionPolicy::SoleContainer,
            credentials: CredentialSource::Profile(profile.into()),
            outputs: OutputSet::TaskDefinitionOnly,
        }
    }
}

/// What a successful render produced
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    /// Path of the written task definition file
    pub path: PathBuf,
    /// Every non-empty container name, in definition order
    pub container_names: Vec<String>,
    /// Name of the container that was updated
    pub selected_name: Option<String>,
    /// The sanitized document that was written
    pub task_definition: TaskDefinition,
}

/// Renders the task definition and reports the outputs
pub async fn run(
    plane: &dyn ControlPlane,
    config: &Config,
    host: &HostEnvironment,
    profile: &DeployProfile,
    sink: &mut dyn OutputSink,
) -> Result<RenderOutcome> {
    let outcome = render_task_definition(plane, config, host, profile.policy).await?;
    report_outputs(&outcome, profile.outputs, sink)?;
    Ok(outcome)
}

/// Renders the updated task definition for `config.service` and writes it to
/// the host's working directory
///
/// Nothing is written if any step fails.
pub async fn render_task_definition(
    plane: &dyn ControlPlane,
    config: &Config,
    host: &HostEnvironment,
    policy: SelectionPolicy,
) -> Result<RenderOutcome> {
    let services = plane
        .describe_services(&config.cluster, std::slice::from_ref(&config.service))
        .await
        .context("Failed to describe service")?;

    let Some(service) = services.services.as_deref().and_then(|s| s.first()) else {
        warn!("{}", to_payload(&services));
        return Err(DeployError::ServiceNotFound {
            cluster: config.cluster.clone(),
            service: config.service.clone(),
        }
        .into());
    };

    let Some(reference) = service.current_task_definition() else {
        warn!("{}", to_payload(&services));
        return Err(DeployError::MissingTaskDefinitionReference {
            service: config.service.clone(),
        }
        .into());
    };

    let described = plane
        .describe_task_definition(reference)
        .await
        .with_context(|| format!("Failed to describe task definition {}", reference))?;

    debug!(
        "Service {} is currently running: ARN: {}",
        service.service_name.as_deref().unwrap_or(&config.service),
        reference
    );

    let Some(mut task_definition) = described.task_definition.clone() else {
        warn!("{}", to_payload(&described));
        return Err(DeployError::MissingTaskDefinition {
            reference: reference.to_string(),
        }
        .into());
    };

    let selection = match select_container(
        task_definition.container_definitions.as_deref().unwrap_or_default(),
        policy,
    ) {
        Ok(selection) => selection,
        Err(e) => {
            warn!("{}", to_payload(&described));
            return Err(e.into());
        }
    };

    debug!(
        "Container Definitions names: {}",
        selection.all_names.join(", ")
    );

    let container = task_definition
        .container_definitions
        .as_mut()
        .and_then(|defs| defs.get_mut(selection.index))
        .ok_or(DeployError::NoContainerFound)?;

    debug!(
        "Task Definition {} is currently running {}",
        task_definition_label(&described.task_definition, reference),
        container.image.as_deref().unwrap_or("<no image>")
    );

    container.image = Some(config.image.clone());

    let build_label = BuildLabel::new(&config.app_env, &config.build_number);
    container.environment = Some(merge_environment(
        container.environment.take(),
        host.revision(),
        build_label.as_str(),
    ));

    sanitize(&mut task_definition);

    let contents = serde_json::to_string_pretty(&task_definition)
        .context("Failed to serialize task definition")?;
    let path = host
        .work_dir()
        .join(format!("task-definition-{}.json", host.revision()));

    tokio::fs::write(&path, contents)
        .await
        .with_context(|| format!("Failed to write task definition to {}", path.display()))?;

    info!("Wrote task definition to {}", path.display());

    Ok(RenderOutcome {
        path,
        container_names: selection.all_names,
        selected_name: selection.name,
        task_definition,
    })
}

/// Publishes the outputs selected by `outputs`
pub fn report_outputs(
    outcome: &RenderOutcome,
    outputs: OutputSet,
    sink: &mut dyn OutputSink,
) -> Result<()> {
    sink.set_output("task-definition", &outcome.path.to_string_lossy())?;

    if outputs == OutputSet::All {
        sink.set_output(
            "container-definition-name",
            &outcome.container_names.join(","),
        )?;
        sink.set_output(
            "first-container-definition-name",
            outcome.selected_name.as_deref().unwrap_or_default(),
        )?;
    }

    Ok(())
}

/// Raw response payload attached to failure diagnostics
fn to_payload<T: Serialize>(response: &T) -> String {
    serde_json::to_string(response).unwrap_or_else(|e| format!("<unserializable response: {}>", e))
}

fn task_definition_label<'a>(task_definition: &'a Option<TaskDefinition>, fallback: &'a str) -> &'a str {
    task_definition
        .as_ref()
        .and_then(|td| td.task_definition_arn.as_deref())
        .unwrap_or(fallback)
}
