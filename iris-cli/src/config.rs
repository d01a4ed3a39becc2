//! Configuration module
//!
//! Handles CLI configuration and builds the orchestrator it drives.

use anyhow::Result;
use iris_client::{CloudFormationClient, StepFunctionsClient, load_sdk_config};
use iris_orchestrator::Orchestrator;
use std::sync::Arc;
use std::time::Duration;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Orchestrator settings; the bind address is unused by the CLI
    pub orchestrator: iris_orchestrator::Config,
}

impl Config {
    pub fn new(region: Option<String>, poll_interval_secs: u64, timeout_minutes: u64) -> Self {
        let mut orchestrator = iris_orchestrator::Config::from_env();
        orchestrator.region = region.filter(|r| !r.is_empty());
        orchestrator.poll_interval = Duration::from_secs(poll_interval_secs);
        orchestrator.stack_timeout = Duration::from_secs(timeout_minutes.saturating_mul(60));

        Self { orchestrator }
    }

    pub fn validate(&self) -> Result<()> {
        self.orchestrator.validate()
    }

    /// Builds an orchestrator backed by the AWS services
    pub async fn connect(&self) -> Orchestrator {
        let sdk_config = load_sdk_config(self.orchestrator.region.as_deref()).await;

        Orchestrator::from_config(
            &self.orchestrator,
            Arc::new(CloudFormationClient::new(&sdk_config)),
            Arc::new(StepFunctionsClient::new(&sdk_config)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides() {
        let config = Config::new(Some("eu-north-1".to_string()), 5, 10);

        assert_eq!(config.orchestrator.region.as_deref(), Some("eu-north-1"));
        assert_eq!(config.orchestrator.poll_interval, Duration::from_secs(5));
        assert_eq!(config.orchestrator.stack_timeout, Duration::from_secs(600));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_huge_timeout_is_rejected() {
        let config = Config::new(None, 15, u64::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = Config::new(None, 0, 10);
        assert!(config.validate().is_err());
    }
}
