//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod render;

pub use render::RenderArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::HostEnvironment;
use crate::service::DeployProfile;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Render the task definition of a multi-container service
    ///
    /// Updates the first named container and reports every output.
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },
    /// Render the task definition of a single-container service
    ///
    /// Authenticates with a named credential profile and updates the first
    /// container.
    RenderSingle {
        /// Credential profile from the shared credentials file
        #[arg(long, env = "INPUT_AWS-PROFILE")]
        aws_profile: String,

        #[command(flatten)]
        args: RenderArgs,
    },
}

/// Handle a CLI command
///
/// Routes the command to the render handler with the matching deployment
/// profile.
///
/// # Arguments
/// * `command` - The command to execute
/// * `host` - Values captured from the host environment
pub async fn handle_command(command: Commands, host: &HostEnvironment) -> Result<()> {
    match command {
        Commands::Render { args } => {
            render::handle_render(args, DeployProfile::multi_container(), host).await
        }
        Commands::RenderSingle { aws_profile, args } => {
            if aws_profile.trim().is_empty() {
                anyhow::bail!("Input required and not supplied: aws-profile");
            }
            render::handle_render(args, DeployProfile::single_container(aws_profile), host).await
        }
    }
}
