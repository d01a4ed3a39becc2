//! Output Extraction Service

use iris_core::domain::stack::{OutputMap, StackDescriptor};
use std::collections::BTreeMap;

use crate::error::{OrchestratorError, Result};

/// Infra outputs the pipeline stack is parameterised with
pub const REQUIRED_INFRA_OUTPUTS: [&str; 2] = ["StepFnLogGroupArn", "RoleStepFunctionsArn"];

/// Pipeline output keys that may carry the state machine ARN, in lookup order
pub const STATE_MACHINE_OUTPUT_KEYS: [&str; 3] =
    ["StateMachineArn", "StateMachine", "StateMachineARN"];

/// Returns the outputs published by a stack
pub fn extract_outputs(desc: &StackDescriptor) -> OutputMap {
    desc.outputs.clone()
}

/// Checks that every `required` key is present in `outputs`
///
/// On failure the error names exactly the missing keys, in `required` order,
/// and carries the outputs that were observed.
pub fn validate_outputs(stack_name: &str, outputs: &OutputMap, required: &[&str]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|key| !outputs.contains_key(**key))
        .map(|key| key.to_string())
        .collect();

    if missing.is_empty() {
        return Ok(());
    }

    Err(OrchestratorError::MissingOutputs {
        stack: stack_name.to_string(),
        missing,
        observed: outputs.clone(),
    })
}

/// Extracts a stack's outputs and validates the required keys in one step
pub fn extract_required_outputs(desc: &StackDescriptor, required: &[&str]) -> Result<OutputMap> {
    let outputs = extract_outputs(desc);
    validate_outputs(&desc.stack_name, &outputs, required)?;
    Ok(outputs)
}

/// Returns `parameters` with `keys` copied over from `outputs`
///
/// Output values override caller-supplied parameters of the same name.
pub fn merge_outputs(
    mut parameters: BTreeMap<String, String>,
    outputs: &OutputMap,
    keys: &[&str],
) -> BTreeMap<String, String> {
    for key in keys {
        if let Some(value) = outputs.get(*key) {
            parameters.insert(key.to_string(), value.clone());
        }
    }
    parameters
}

/// Finds the state machine ARN among the pipeline outputs
pub fn find_state_machine_arn(outputs: &OutputMap) -> Option<&str> {
    STATE_MACHINE_OUTPUT_KEYS
        .iter()
        .filter_map(|key| outputs.get(*key))
        .map(String::as_str)
        .find(|arn| !arn.is_empty())
}
