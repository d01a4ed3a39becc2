//! Service capability traits
//!
//! The orchestrator depends only on these narrow interfaces, never on a
//! concrete SDK client, so tests can substitute in-memory fakes.

use async_trait::async_trait;
use iris_core::domain::deploy::DeployRequest;
use iris_core::domain::stack::StackDescriptor;

use crate::error::Result;

/// Declarative infrastructure service: create, update and describe stacks by name
#[async_trait]
pub trait DeployStackService: Send + Sync {
    /// Describes the named stack
    ///
    /// Fails with [`crate::ClientError::StackNotFound`] if no such stack exists.
    async fn describe_stack(&self, stack_name: &str) -> Result<StackDescriptor>;

    /// Starts creating a stack
    ///
    /// # Returns
    /// The provider's stack id, when reported
    async fn create_stack(&self, request: &DeployRequest) -> Result<Option<String>>;

    /// Starts updating an existing stack
    ///
    /// Fails with [`crate::ClientError::NoUpdates`] if the stack already
    /// matches the request.
    async fn update_stack(&self, request: &DeployRequest) -> Result<Option<String>>;
}

/// Asynchronous workflow service: start an execution by identifier
#[async_trait]
pub trait WorkflowService: Send + Sync {
    /// Starts an execution of `workflow_id` and returns its execution id
    ///
    /// # Arguments
    /// * `workflow_id` - State machine ARN
    /// * `name` - Execution name, unique per state machine
    /// * `input` - JSON-encoded input payload
    async fn start_execution(&self, workflow_id: &str, name: &str, input: &str) -> Result<String>;
}
