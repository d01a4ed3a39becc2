//! Iris Orchestrator server
//!
//! Exposes the deploy flow over HTTP so it can be triggered from CI or an
//! event source.
//!
//! Architecture:
//! - Configuration: Load settings from environment or defaults
//! - Clients: CloudFormation and Step Functions via the AWS SDK
//! - Services: Deploy, wait, output extraction and workflow trigger
//! - API: axum router over a shared orchestrator

use anyhow::{Context, Result};
use iris_client::{CloudFormationClient, StepFunctionsClient, load_sdk_config};
use iris_orchestrator::{Config, Orchestrator, api};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iris_orchestrator=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Iris Orchestrator...");

    let config = Config::from_env();
    config.validate().context("Invalid configuration")?;
    info!(
        "Loaded configuration: region={}, poll_interval={:?}, stack_timeout={:?}",
        config.region.as_deref().unwrap_or("<sdk default>"),
        config.poll_interval,
        config.stack_timeout
    );

    let sdk_config = load_sdk_config(config.region.as_deref()).await;
    let orchestrator = Orchestrator::from_config(
        &config,
        Arc::new(CloudFormationClient::new(&sdk_config)),
        Arc::new(StepFunctionsClient::new(&sdk_config)),
    );

    info!("AWS clients initialized");

    let app = api::create_router(Arc::new(orchestrator));

    info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .await
        .context("Server terminated unexpectedly")?;

    Ok(())
}
