//! Deploy handler DTOs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

use crate::domain::deploy::DeployResult;
use crate::domain::stack::OutputMap;
use crate::domain::stage::Stage;

pub const DEFAULT_INFRA_STACK_NAME: &str = "iris-mlops-infra";
pub const DEFAULT_PIPELINE_STACK_NAME: &str = "iris-mlops-pipeline";

/// Request that triggers the full deploy-and-run flow
///
/// Required fields are optional here so that a missing template location is
/// reported as a validation error in the response rather than a parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeployEvent {
    #[serde(default, alias = "InfraTemplateS3")]
    pub infra_template_location: Option<String>,

    #[serde(default, alias = "PipelineTemplateS3")]
    pub pipeline_template_location: Option<String>,

    #[serde(default)]
    pub infra_stack_name: Option<String>,

    #[serde(default)]
    pub pipeline_stack_name: Option<String>,

    #[serde(default, deserialize_with = "string_map")]
    pub infra_parameters: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "string_map")]
    pub pipeline_parameters: BTreeMap<String, String>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub capabilities: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_input: Option<JsonValue>,
}

/// Accepts `null` wherever an empty collection is allowed
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parameter maps accept scalar JSON values and keep their string form
fn string_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<BTreeMap<String, JsonValue>> = Option::deserialize(deserializer)?;

    raw.unwrap_or_default()
        .into_iter()
        .map(|(key, value)| -> Result<(String, String), D::Error> {
            let value = match value {
                JsonValue::String(s) => s,
                JsonValue::Number(n) => n.to_string(),
                JsonValue::Bool(b) => b.to_string(),
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "parameter {} must be a string, number or boolean, got {}",
                        key, other
                    )));
                }
            };
            Ok((key, value))
        })
        .collect()
}

/// Overall outcome of a handler invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

/// Response record of a handler invocation
///
/// Error responses carry whatever progress was made before the failing stage
/// so an operator can see how far the flow got.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeployResponse {
    pub status: ResponseStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<Stage>,

    #[serde(default)]
    pub stacks: Vec<DeployResult>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infra_outputs: Option<OutputMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pipeline_outputs: Option<OutputMap>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_outputs: Option<Vec<String>>,

    /// Always serialized; `null` when no workflow was started
    #[serde(rename = "executionArn", default)]
    pub execution_arn: Option<String>,
}

impl DeployResponse {
    /// Creates a successful response
    pub fn ok(
        stacks: Vec<DeployResult>,
        infra_outputs: OutputMap,
        pipeline_outputs: OutputMap,
        execution_arn: Option<String>,
    ) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: None,
            failed_stage: None,
            stacks,
            infra_outputs: Some(infra_outputs),
            pipeline_outputs: Some(pipeline_outputs),
            missing_outputs: None,
            execution_arn,
        }
    }

    /// Creates an error response for a failure in `stage`
    pub fn error(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
            failed_stage: Some(stage),
            stacks: Vec::new(),
            infra_outputs: None,
            pipeline_outputs: None,
            missing_outputs: None,
            execution_arn: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}
