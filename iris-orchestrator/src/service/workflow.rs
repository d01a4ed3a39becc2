//! Workflow Trigger Service
//!
//! Starts a workflow execution and returns immediately.

use chrono::Utc;
use iris_client::WorkflowService;
use iris_core::domain::workflow::{WorkflowExecution, default_input, execution_name};
use serde_json::Value as JsonValue;
use tracing::{error, info};

use crate::error::{OrchestratorError, Result};

/// Starts an execution of `workflow_id`
///
/// # Arguments
/// * `workflow_id` - State machine ARN; must not be empty
/// * `input` - Execution input; `None`, `null` and `{}` all fall back to a record of
///   `trigger_source` and the start time
/// * `trigger_source` - Tag used in the default input and the execution name
pub async fn start_workflow(
    workflows: &dyn WorkflowService,
    workflow_id: &str,
    input: Option<JsonValue>,
    trigger_source: &str,
) -> Result<WorkflowExecution> {
    if workflow_id.trim().is_empty() {
        return Err(OrchestratorError::InvalidArgument(
            "state machine ARN is required to start an execution".to_string(),
        ));
    }

    let started_at = Utc::now();
    let name = execution_name(trigger_source, started_at);
    let payload = input
        .filter(|v| !v.is_null() && v.as_object().is_none_or(|o| !o.is_empty()))
        .unwrap_or_else(|| default_input(trigger_source, started_at));

    info!("Starting execution {} of {}", name, workflow_id);

    let execution_arn = workflows
        .start_execution(workflow_id, &name, &payload.to_string())
        .await
        .map_err(|e| {
            error!("Failed to start state machine {}: {}", workflow_id, e);
            OrchestratorError::WorkflowTrigger {
                workflow_id: workflow_id.to_string(),
                source: e,
            }
        })?;

    info!("Started execution {}", execution_arn);

    Ok(WorkflowExecution {
        execution_arn,
        name,
        started_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeWorkflowService;

    #[tokio::test]
    async fn test_empty_workflow_id_is_invalid() {
        let fake = FakeWorkflowService::new();

        let err = start_workflow(&fake, "  ", None, "ci-deploy").await.unwrap_err();

        assert!(matches!(err, OrchestratorError::InvalidArgument(_)));
        assert!(fake.started().is_empty());
    }

    #[tokio::test]
    async fn test_default_input_and_name() {
        let fake = FakeWorkflowService::new();

        let execution = start_workflow(&fake, "arn:test:sm1", None, "ci-deploy")
            .await
            .unwrap();

        let started = fake.started();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].workflow_id, "arn:test:sm1");
        assert_eq!(started[0].name, execution.name);
        assert!(execution.name.starts_with("ci-deploy-"));
        assert_eq!(started[0].input["trigger"], "ci-deploy");
        assert_eq!(started[0].input["timestamp"], execution.started_at.timestamp());
        assert_eq!(
            execution.execution_arn,
            format!("arn:test:sm1:execution:{}", execution.name)
        );
    }

    #[tokio::test]
    async fn test_caller_input_is_passed_through() {
        let fake = FakeWorkflowService::new();
        let input = serde_json::json!({ "dataset": "iris", "retrain": true });

        start_workflow(&fake, "arn:test:sm1", Some(input.clone()), "ci-deploy")
            .await
            .unwrap();

        assert_eq!(fake.started()[0].input, input);
    }

    #[tokio::test]
    async fn test_empty_input_uses_default_record() {
        let fake = FakeWorkflowService::new();

        for input in [serde_json::json!({}), JsonValue::Null] {
            start_workflow(&fake, "arn:test:sm1", Some(input), "ci-deploy")
                .await
                .unwrap();
        }

        let started = fake.started();
        assert_eq!(started.len(), 2);
        for execution in started {
            assert_eq!(execution.input["trigger"], "ci-deploy");
            assert!(execution.input["timestamp"].is_i64());
        }
    }

    #[tokio::test]
    async fn test_rejected_start_is_trigger_error() {
        let fake = FakeWorkflowService::failing("execution limit exceeded");

        let err = start_workflow(&fake, "arn:test:sm1", None, "ci-deploy")
            .await
            .unwrap_err();

        assert!(matches!(err, OrchestratorError::WorkflowTrigger { .. }));
    }
}
