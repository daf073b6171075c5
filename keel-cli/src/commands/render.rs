//! Render command handler
//!
//! Builds the control-plane client for the deployment profile, runs the
//! render service, and prints a summary.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use keel_client::EcsClient;

use crate::actions::ActionsOutput;
use crate::config::{Config, HostEnvironment};
use crate::service::{self, DeployProfile, RenderOutcome};

/// Inputs shared by both render commands
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Region of the cluster
    #[arg(long, env = "INPUT_AWS-REGION")]
    aws_region: String,

    /// Cluster name or ARN
    #[arg(long, env = "INPUT_AWS-CLUSTER-NAME")]
    aws_cluster_name: String,

    /// Service name or ARN
    #[arg(long, env = "INPUT_AWS-SERVICE-NAME")]
    aws_service_name: String,

    /// Image reference to deploy
    #[arg(long, env = "INPUT_DOCKER-IMAGE")]
    docker_image: String,

    /// Deployment environment label
    #[arg(long, env = "INPUT_APP-ENV")]
    app_env: String,

    /// Build number
    #[arg(long, env = "INPUT_DOCKER-BUILD-NUMBER")]
    docker_build_number: String,

    /// Override the ECS API endpoint
    #[arg(long, env = "AWS_ENDPOINT_URL_ECS")]
    endpoint_url: Option<String>,
}

impl From<RenderArgs> for Config {
    fn from(args: RenderArgs) -> Self {
        Config {
            region: args.aws_region,
            cluster: args.aws_cluster_name,
            service: args.aws_service_name,
            image: args.docker_image,
            app_env: args.app_env,
            build_number: args.docker_build_number,
            endpoint_url: args.endpoint_url.filter(|url| !url.is_empty()),
        }
    }
}

/// Handle a render command under `profile`
pub async fn handle_render(
    args: RenderArgs,
    profile: DeployProfile,
    host: &HostEnvironment,
) -> Result<()> {
    let config = Config::from(args);
    config.validate()?;

    let credentials = profile
        .credentials
        .resolve()
        .context("Failed to resolve AWS credentials")?;

    let client = match &config.endpoint_url {
        Some(url) => EcsClient::with_endpoint(&config.region, credentials, url)?,
        None => EcsClient::new(&config.region, credentials)?,
    };

    let mut sink = ActionsOutput::new(host.output_file.clone());
    let outcome = service::run(&client, &config, host, &profile, &mut sink).await?;

    print_summary(&outcome);

    Ok(())
}

/// Print a render summary to stderr
fn print_summary(outcome: &RenderOutcome) {
    eprintln!(
        "{} {}",
        "Task definition written to".green(),
        outcome.path.display().to_string().bold()
    );
    if let Some(name) = &outcome.selected_name {
        eprintln!("    Container:    {}", name.cyan());
    }
    if !outcome.container_names.is_empty() {
        eprintln!(
            "    Containers:   {}",
            outcome.container_names.join(", ").dimmed()
        );
    }
}
