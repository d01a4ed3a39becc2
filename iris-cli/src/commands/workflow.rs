//! Workflow command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use iris_orchestrator::service::start_workflow;
use serde_json::Value as JsonValue;

use super::parse_json;
use crate::config::Config;

/// Workflow subcommands
#[derive(Subcommand)]
pub enum WorkflowCommands {
    /// Start an execution of a state machine
    Start {
        /// State machine ARN
        arn: String,

        /// Execution input as a JSON document
        #[arg(long, value_parser = parse_json)]
        input: Option<JsonValue>,
    },
}

/// Handle workflow commands
pub async fn handle_workflow_command(command: WorkflowCommands, config: &Config) -> Result<()> {
    let orchestrator = config.connect().await;

    match command {
        WorkflowCommands::Start { arn, input } => {
            let execution = start_workflow(
                orchestrator.workflows(),
                &arn,
                input,
                orchestrator.trigger_source(),
            )
            .await?;

            println!("{}", "✓ Execution started".green().bold());
            println!("  Name:    {}", execution.name.bold());
            println!("  ARN:     {}", execution.execution_arn.cyan());
            println!(
                "  Started: {}",
                execution.started_at.format("%Y-%m-%d %H:%M:%S")
            );
        }
    }

    Ok(())
}
