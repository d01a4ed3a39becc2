//! Step Functions-backed workflow service

use async_trait::async_trait;
use aws_config::SdkConfig;
use tracing::debug;

use crate::error::{ClientError, Operation, Result};
use crate::service::WorkflowService;

/// [`WorkflowService`] implementation over the Step Functions API
#[derive(Debug, Clone)]
pub struct StepFunctionsClient {
    client: aws_sdk_sfn::Client,
}

impl StepFunctionsClient {
    /// Creates a client from a loaded SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_sfn::Client::new(config),
        }
    }

    /// Wraps an already configured SDK client
    pub fn with_client(client: aws_sdk_sfn::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WorkflowService for StepFunctionsClient {
    async fn start_execution(&self, workflow_id: &str, name: &str, input: &str) -> Result<String> {
        debug!("StartExecution {} name={}", workflow_id, name);

        let output = self
            .client
            .start_execution()
            .state_machine_arn(workflow_id)
            .name(name)
            .input(input)
            .send()
            .await
            .map_err(|e| ClientError::from_sdk(Operation::StartExecution, workflow_id, e))?;

        Ok(output.execution_arn().to_string())
    }
}
