//! Stack Wait Service
//!
//! Polls a stack's status at a fixed interval until it reaches a terminal
//! status or the deadline passes.

use iris_client::{DeployStackService, ErrorKind};
use iris_core::domain::stack::{StackDescriptor, StackStatus};
use std::time::Duration;
use tokio::time::{self, Instant};
use tracing::{error, info};

use crate::config::Config;
use crate::error::{OrchestratorError, Result};

/// Polling interval and deadline for a stack wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    pub interval: Duration,
    pub timeout: Duration,
}

impl WaitPolicy {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::new(Duration::from_secs(15), Duration::from_secs(30 * 60))
    }
}

impl From<&Config> for WaitPolicy {
    fn from(config: &Config) -> Self {
        Self::new(config.poll_interval, config.stack_timeout)
    }
}

/// Blocks until `stack_name` reaches `CREATE_COMPLETE` or `UPDATE_COMPLETE`
///
/// A stack that is not visible yet is polled again; any other query fault
/// is returned immediately.
pub async fn wait_for_stack(
    stacks: &dyn DeployStackService,
    stack_name: &str,
    policy: &WaitPolicy,
) -> Result<StackDescriptor> {
    let started = Instant::now();
    // A timeout too large to represent never expires
    let deadline = started.checked_add(policy.timeout);

    info!(
        "Waiting for stack {} (interval: {:?}, timeout: {:?})",
        stack_name, policy.interval, policy.timeout
    );

    loop {
        match stacks.describe_stack(stack_name).await {
            Ok(desc) => {
                info!("{} status={}", stack_name, desc.raw_status);

                match desc.status {
                    StackStatus::Complete => return Ok(desc),
                    StackStatus::Failed | StackStatus::Deleted => {
                        return Err(OrchestratorError::StackFailed {
                            stack: stack_name.to_string(),
                            status: desc.raw_status,
                            reason: desc.status_reason,
                        });
                    }
                    StackStatus::Pending => {}
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("{} not found yet", stack_name);
            }
            Err(e) => {
                error!("describe error for {}: {}", stack_name, e);
                return Err(OrchestratorError::StackQuery {
                    stack: stack_name.to_string(),
                    source: e,
                });
            }
        }

        if deadline.is_some_and(|d| Instant::now() > d) {
            return Err(OrchestratorError::Timeout {
                stack: stack_name.to_string(),
                elapsed: started.elapsed(),
            });
        }

        time::sleep(policy.interval).await;
    }
}
