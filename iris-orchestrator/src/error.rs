//! Orchestrator error taxonomy

use iris_client::ClientError;
use iris_core::domain::stack::OutputMap;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Failures of a single orchestration stage
///
/// None of these escape the top-level handler; they are converted into an
/// error response there.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// Request is missing required fields
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation was called without a required argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Create or update was rejected for a reason other than "no changes"
    #[error("Failed to deploy stack {stack}: {source}")]
    Deploy { stack: String, source: ClientError },

    /// Status query failed for a reason other than "not found yet"
    #[error("Failed to describe stack {stack}: {source}")]
    StackQuery { stack: String, source: ClientError },

    /// Stack reached a terminal failure status
    #[error("Stack {stack} entered failure state: {status}{}", reason_suffix(.reason))]
    StackFailed {
        stack: String,
        status: String,
        reason: Option<String>,
    },

    /// No terminal status was observed before the deadline
    #[error("Timeout waiting for stack {stack} after {}s", .elapsed.as_secs())]
    Timeout { stack: String, elapsed: Duration },

    /// Stack succeeded but did not publish every required output
    #[error("Missing {stack} outputs: {missing:?}")]
    MissingOutputs {
        stack: String,
        missing: Vec<String>,
        /// Outputs that were present, for diagnostics
        observed: OutputMap,
    },

    /// Workflow service rejected the start request
    #[error("Failed to start state machine {workflow_id}: {source}")]
    WorkflowTrigger {
        workflow_id: String,
        source: ClientError,
    },
}

fn reason_suffix(reason: &Option<String>) -> String {
    reason
        .as_deref()
        .map(|r| format!(" ({})", r))
        .unwrap_or_default()
}
