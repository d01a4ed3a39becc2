//! Orchestration flow stages

use serde::{Deserialize, Serialize};

/// Stages of the deploy-and-trigger flow, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Validate,
    DeployInfra,
    WaitInfra,
    ExtractInfraOutputs,
    ValidateInfraOutputs,
    DeployPipeline,
    WaitPipeline,
    ExtractPipelineOutputs,
    TriggerWorkflow,
    Done,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Stage::Validate => "validate",
            Stage::DeployInfra => "deploy_infra",
            Stage::WaitInfra => "wait_infra",
            Stage::ExtractInfraOutputs => "extract_infra_outputs",
            Stage::ValidateInfraOutputs => "validate_infra_outputs",
            Stage::DeployPipeline => "deploy_pipeline",
            Stage::WaitPipeline => "wait_pipeline",
            Stage::ExtractPipelineOutputs => "extract_pipeline_outputs",
            Stage::TriggerWorkflow => "trigger_workflow",
            Stage::Done => "done",
        };
        f.write_str(s)
    }
}
