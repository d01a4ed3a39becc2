//! Stack command handlers
//!
//! Read-only stack inspection plus a standalone wait.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use iris_core::domain::stack::{StackDescriptor, StackStatus};
use iris_orchestrator::service::{extract_required_outputs, wait_for_stack};

use super::deploy::print_outputs;
use crate::config::Config;

/// Stack subcommands
#[derive(Subcommand)]
pub enum StackCommands {
    /// Show a stack's status and outputs
    Describe {
        /// Stack name
        name: String,
    },
    /// Wait until a stack reaches a terminal status
    Wait {
        /// Stack name
        name: String,
    },
    /// Print a stack's outputs
    Outputs {
        /// Stack name
        name: String,

        /// Fail unless this output key is present (repeatable)
        #[arg(long)]
        require: Vec<String>,
    },
}

/// Handle stack commands
pub async fn handle_stack_command(command: StackCommands, config: &Config) -> Result<()> {
    let orchestrator = config.connect().await;

    match command {
        StackCommands::Describe { name } => {
            let desc = orchestrator
                .describe(&name)
                .await
                .with_context(|| format!("Failed to describe stack {}", name))?;
            print_stack_details(&desc);
        }
        StackCommands::Wait { name } => {
            let desc =
                wait_for_stack(orchestrator.stacks(), &name, orchestrator.wait_policy()).await?;
            println!(
                "{}",
                format!("✓ Stack {} is {}", desc.stack_name, desc.raw_status)
                    .green()
                    .bold()
            );
        }
        StackCommands::Outputs { name, require } => {
            let desc = orchestrator
                .describe(&name)
                .await
                .with_context(|| format!("Failed to describe stack {}", name))?;
            let required: Vec<&str> = require.iter().map(String::as_str).collect();
            let outputs = extract_required_outputs(&desc, &required)?;
            print_outputs("Outputs:", &outputs);
        }
    }

    Ok(())
}

fn print_stack_details(desc: &StackDescriptor) {
    let status = match desc.status {
        StackStatus::Complete => desc.raw_status.green(),
        StackStatus::Pending => desc.raw_status.yellow(),
        StackStatus::Failed | StackStatus::Deleted => desc.raw_status.red(),
    };

    println!("{}", "Stack Details:".bold());
    println!("  Name:    {}", desc.stack_name.bold());
    if let Some(id) = &desc.stack_id {
        println!("  ID:      {}", id.dimmed());
    }
    println!("  Status:  {}", status);
    if let Some(reason) = &desc.status_reason {
        println!("  Reason:  {}", reason);
    }

    print_outputs("Outputs:", &desc.outputs);
}
