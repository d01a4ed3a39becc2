//! Workflow execution types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trigger tag used when no other source is configured
pub const DEFAULT_TRIGGER_SOURCE: &str = "ci-deploy";

/// Handle of a started workflow execution
///
/// Nothing past creation is tracked; the run itself is owned by the
/// workflow service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowExecution {
    pub execution_arn: String,
    pub name: String,
    pub started_at: DateTime<Utc>,
}

/// Builds the execution name for a run started at `at`
pub fn execution_name(trigger_source: &str, at: DateTime<Utc>) -> String {
    format!("{}-{}", trigger_source, at.timestamp())
}

/// Default input payload tagging the trigger source and start time
pub fn default_input(trigger_source: &str, at: DateTime<Utc>) -> serde_json::Value {
    serde_json::json!({
        "trigger": trigger_source,
        "timestamp": at.timestamp(),
    })
}
