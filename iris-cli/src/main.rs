//! Iris CLI
//!
//! Command-line interface for deploying the Iris MLOps stacks and
//! inspecting them.

mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "iris")]
#[command(about = "Iris MLOps deploy CLI", long_about = None)]
struct Cli {
    /// AWS region (the SDK default chain is used when unset)
    #[arg(long, env = "AWS_REGION", global = true)]
    region: Option<String>,

    /// Seconds between stack status queries
    #[arg(long, env = "STACK_POLL_INTERVAL", default_value = "15", global = true)]
    poll_interval: u64,

    /// Minutes to wait for a stack to settle
    #[arg(long, env = "STACK_TIMEOUT_MINUTES", default_value = "30", global = true)]
    timeout_minutes: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so command output stays pipeable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iris=info,iris_orchestrator=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(cli.region, cli.poll_interval, cli.timeout_minutes);
    config.validate()?;

    handle_command(cli.command, &config).await
}
