//! Orchestrator configuration
//!
//! Defines all configurable parameters for the orchestrator including
//! stack polling, default stack names and the HTTP bind address.

use iris_core::domain::workflow::DEFAULT_TRIGGER_SOURCE;
use iris_core::dto::deploy::{DEFAULT_INFRA_STACK_NAME, DEFAULT_PIPELINE_STACK_NAME};
use std::time::Duration;

/// Longest accepted stack wait
pub const MAX_STACK_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Orchestrator configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP trigger API binds to (e.g., "0.0.0.0:8080")
    pub bind_addr: String,

    /// AWS region override; the SDK region chain is used when unset
    pub region: Option<String>,

    /// How often to query a stack's status while waiting on it
    pub poll_interval: Duration,

    /// How long to wait for a stack to reach a terminal status
    pub stack_timeout: Duration,

    /// Infra stack name used when a request does not name one
    pub infra_stack_name: String,

    /// Pipeline stack name used when a request does not name one
    pub pipeline_stack_name: String,

    /// Tag recorded in default workflow input and execution names
    pub trigger_source: String,
}

impl Config {
    /// Creates a new configuration with defaults
    pub fn new(bind_addr: String) -> Self {
        Self {
            bind_addr,
            region: None,
            poll_interval: Duration::from_secs(15),
            stack_timeout: Duration::from_secs(30 * 60),
            infra_stack_name: DEFAULT_INFRA_STACK_NAME.to_string(),
            pipeline_stack_name: DEFAULT_PIPELINE_STACK_NAME.to_string(),
            trigger_source: DEFAULT_TRIGGER_SOURCE.to_string(),
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Expected environment variables (all optional):
    /// - IRIS_BIND_ADDR (default: 0.0.0.0:8080)
    /// - AWS_REGION
    /// - STACK_POLL_INTERVAL (seconds, default: 15)
    /// - STACK_TIMEOUT_MINUTES (default: 30)
    /// - INFRA_STACK_NAME (default: iris-mlops-infra)
    /// - PIPELINE_STACK_NAME (default: iris-mlops-pipeline)
    /// - WORKFLOW_TRIGGER_SOURCE (default: ci-deploy)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let bind_addr = std::env::var("IRIS_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let region = std::env::var("AWS_REGION").ok().filter(|r| !r.is_empty());

        let poll_interval = std::env::var("STACK_POLL_INTERVAL")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(defaults.poll_interval);

        let stack_timeout = std::env::var("STACK_TIMEOUT_MINUTES")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .and_then(|m| m.checked_mul(60))
            .map(Duration::from_secs)
            .unwrap_or(defaults.stack_timeout);

        let infra_stack_name =
            std::env::var("INFRA_STACK_NAME").unwrap_or(defaults.infra_stack_name);

        let pipeline_stack_name =
            std::env::var("PIPELINE_STACK_NAME").unwrap_or(defaults.pipeline_stack_name);

        let trigger_source =
            std::env::var("WORKFLOW_TRIGGER_SOURCE").unwrap_or(defaults.trigger_source);

        Self {
            bind_addr,
            region,
            poll_interval,
            stack_timeout,
            infra_stack_name,
            pipeline_stack_name,
            trigger_source,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.bind_addr.is_empty() {
            anyhow::bail!("bind_addr cannot be empty");
        }

        if self.poll_interval.is_zero() {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.stack_timeout.is_zero() {
            anyhow::bail!("stack_timeout must be greater than 0");
        }

        if self.stack_timeout > MAX_STACK_TIMEOUT {
            anyhow::bail!(
                "stack_timeout cannot exceed {} hours",
                MAX_STACK_TIMEOUT.as_secs() / 3600
            );
        }

        if self.poll_interval > self.stack_timeout {
            anyhow::bail!("poll_interval cannot exceed stack_timeout");
        }

        if self.infra_stack_name.trim().is_empty() || self.pipeline_stack_name.trim().is_empty() {
            anyhow::bail!("default stack names cannot be empty");
        }

        if self.trigger_source.trim().is_empty() {
            anyhow::bail!("trigger_source cannot be empty");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new("0.0.0.0:8080".to_string())
    }
}
