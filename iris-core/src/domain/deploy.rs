//! Deploy request and result types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single create-or-update request for one stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployRequest {
    pub stack_name: String,
    /// Template location (`s3://` or `https://` URI)
    pub template_location: String,
    pub parameters: BTreeMap<String, String>,
    /// Capability acknowledgements, e.g. `CAPABILITY_NAMED_IAM`
    pub capabilities: Vec<String>,
}

impl DeployRequest {
    pub fn new(stack_name: impl Into<String>, template_location: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            template_location: template_location.into(),
            parameters: BTreeMap::new(),
            capabilities: Vec::new(),
        }
    }

    pub fn with_parameters(mut self, parameters: BTreeMap<String, String>) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn with_capabilities(mut self, capabilities: Vec<String>) -> Self {
        self.capabilities = capabilities;
        self
    }
}

/// Outcome tag of a deploy call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeployStatus {
    UpdateStarted,
    CreateStarted,
    NoChange,
    Error,
}

impl DeployStatus {
    /// Returns true if the deploy began a remote state transition worth waiting on
    pub fn is_started(&self) -> bool {
        matches!(self, DeployStatus::UpdateStarted | DeployStatus::CreateStarted)
    }
}

impl std::fmt::Display for DeployStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeployStatus::UpdateStarted => "update_started",
            DeployStatus::CreateStarted => "create_started",
            DeployStatus::NoChange => "no_change",
            DeployStatus::Error => "error",
        };
        f.write_str(s)
    }
}

/// Result of a deploy call for one stack
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployResult {
    pub stack_name: String,
    pub status: DeployStatus,
    /// Provider stack id; absent for `no_change` and `error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl DeployResult {
    pub fn started(
        stack_name: impl Into<String>,
        status: DeployStatus,
        stack_id: Option<String>,
    ) -> Self {
        Self {
            stack_name: stack_name.into(),
            status,
            stack_id,
            message: None,
        }
    }

    pub fn no_change(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            status: DeployStatus::NoChange,
            stack_id: None,
            message: None,
        }
    }

    pub fn error(stack_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            status: DeployStatus::Error,
            stack_id: None,
            message: Some(message.into()),
        }
    }

    pub fn is_started(&self) -> bool {
        self.status.is_started()
    }
}
