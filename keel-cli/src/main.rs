//! Keel CLI
//!
//! Renders an updated ECS task definition for a deployment: the running
//! definition of a service with a new image and refreshed build identity,
//! ready to be registered again.

mod actions;
mod commands;
mod config;
mod service;

use std::process::ExitCode;

use clap::Parser;
use commands::{Commands, handle_command};
use config::HostEnvironment;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "keel")]
#[command(about = "Render ECS task definitions for deployment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries workflow commands
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "keel=info,keel_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let host = HostEnvironment::from_env();

    match handle_command(cli.command, &host).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            actions::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
