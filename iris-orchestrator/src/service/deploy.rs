//! Stack Deploy Service
//!
//! Creates a stack if it does not exist, otherwise updates it. Only starts
//! the remote transition; waiting is a separate step.

use iris_client::{ClientError, DeployStackService, ErrorKind};
use iris_core::domain::deploy::{DeployRequest, DeployResult, DeployStatus};
use tracing::{error, info};

use crate::error::{OrchestratorError, Result};

/// Create-or-update a stack
///
/// An update with nothing to change yields a `no_change` result, not an error.
pub async fn deploy_stack(
    stacks: &dyn DeployStackService,
    request: &DeployRequest,
) -> Result<DeployResult> {
    let stack = &request.stack_name;
    let deploy_error = |source: ClientError| OrchestratorError::Deploy {
        stack: stack.clone(),
        source,
    };

    let exists = match stacks.describe_stack(stack).await {
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::NotFound => false,
        Err(e) => {
            error!("Unexpected error probing stack {}: {}", stack, e);
            return Err(deploy_error(e));
        }
    };

    let (status, outcome) = if exists {
        info!("Updating stack {} from {}", stack, request.template_location);
        (DeployStatus::UpdateStarted, stacks.update_stack(request).await)
    } else {
        info!("Creating stack {} from {}", stack, request.template_location);
        (DeployStatus::CreateStarted, stacks.create_stack(request).await)
    };

    match outcome {
        Ok(stack_id) => {
            info!(
                "{}: {} ({})",
                status,
                stack,
                stack_id.as_deref().unwrap_or("no stack id")
            );
            Ok(DeployResult::started(stack, status, stack_id))
        }
        Err(e) if e.kind() == ErrorKind::NoUpdates => {
            info!("No updates required for {}", stack);
            Ok(DeployResult::no_change(stack))
        }
        Err(e) => {
            error!("Failed to deploy stack {}: {}", stack, e);
            Err(deploy_error(e))
        }
    }
}
