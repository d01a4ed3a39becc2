//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod deploy;
mod stack;
mod workflow;

pub use deploy::DeployArgs;
pub use stack::StackCommands;
pub use workflow::WorkflowCommands;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde_json::Value as JsonValue;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Deploy the infra and pipeline stacks, then start the workflow
    Deploy(DeployArgs),
    /// Stack inspection
    Stack {
        #[command(subcommand)]
        command: StackCommands,
    },
    /// Workflow executions
    Workflow {
        #[command(subcommand)]
        command: WorkflowCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Deploy(args) => deploy::handle_deploy(args, config).await,
        Commands::Stack { command } => stack::handle_stack_command(command, config).await,
        Commands::Workflow { command } => {
            workflow::handle_workflow_command(command, config).await
        }
    }
}

/// Parse a JSON document given on the command line
fn parse_json(s: &str) -> Result<JsonValue> {
    serde_json::from_str(s).with_context(|| format!("invalid JSON input: {}", s))
}
