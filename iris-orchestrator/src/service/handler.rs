//! Deploy Handler
//!
//! Composes the deploy, wait, output and workflow services into the full
//! flow: infra stack → pipeline stack → workflow execution.
//!
//! The flow is strictly sequential and stops at the first failing stage.
//! Failures never escape [`Orchestrator::handle`]; they become an error
//! response carrying the progress made so far.

use iris_client::{DeployStackService, WorkflowService};
use iris_core::domain::deploy::{DeployRequest, DeployResult};
use iris_core::domain::stack::{OutputMap, StackDescriptor};
use iris_core::domain::stage::Stage;
use iris_core::domain::workflow::{DEFAULT_TRIGGER_SOURCE, WorkflowExecution};
use iris_core::dto::deploy::{
    DEFAULT_INFRA_STACK_NAME, DEFAULT_PIPELINE_STACK_NAME, DeployEvent, DeployResponse,
};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{OrchestratorError, Result};
use crate::service::deploy::deploy_stack;
use crate::service::outputs::{
    REQUIRED_INFRA_OUTPUTS, extract_outputs, find_state_machine_arn, merge_outputs,
    validate_outputs,
};
use crate::service::wait::{WaitPolicy, wait_for_stack};
use crate::service::workflow::start_workflow;

/// Deployment orchestrator
///
/// Holds the injected service handles and the settings shared by every
/// invocation. Cheap to share behind an `Arc`.
pub struct Orchestrator {
    stacks: Arc<dyn DeployStackService>,
    workflows: Arc<dyn WorkflowService>,
    wait_policy: WaitPolicy,
    infra_stack_name: String,
    pipeline_stack_name: String,
    trigger_source: String,
}

/// Progress of one invocation, reported back on failure
struct Progress {
    stage: Stage,
    stacks: Vec<DeployResult>,
    infra_outputs: Option<OutputMap>,
    pipeline_outputs: Option<OutputMap>,
}

impl Progress {
    fn new() -> Self {
        Self {
            stage: Stage::Validate,
            stacks: Vec::new(),
            infra_outputs: None,
            pipeline_outputs: None,
        }
    }

    fn enter(&mut self, stage: Stage) {
        self.stage = stage;
        info!("[{}] starting", stage);
    }

    fn into_error_response(self, err: OrchestratorError) -> DeployResponse {
        let mut response = DeployResponse::error(self.stage, err.to_string());
        response.stacks = self.stacks;
        response.infra_outputs = self.infra_outputs;
        response.pipeline_outputs = self.pipeline_outputs;

        if let OrchestratorError::MissingOutputs { missing, .. } = err {
            response.missing_outputs = Some(missing);
        }

        response
    }
}

/// Validated, defaulted view of a deploy event
struct Plan {
    infra: DeployRequest,
    pipeline_stack_name: String,
    pipeline_template_location: String,
    pipeline_parameters: BTreeMap<String, String>,
    capabilities: Vec<String>,
    execution_input: Option<JsonValue>,
}

impl Orchestrator {
    /// Creates an orchestrator with default polling and stack names
    pub fn new(stacks: Arc<dyn DeployStackService>, workflows: Arc<dyn WorkflowService>) -> Self {
        Self {
            stacks,
            workflows,
            wait_policy: WaitPolicy::default(),
            infra_stack_name: DEFAULT_INFRA_STACK_NAME.to_string(),
            pipeline_stack_name: DEFAULT_PIPELINE_STACK_NAME.to_string(),
            trigger_source: DEFAULT_TRIGGER_SOURCE.to_string(),
        }
    }

    /// Creates an orchestrator using the settings in `config`
    pub fn from_config(
        config: &Config,
        stacks: Arc<dyn DeployStackService>,
        workflows: Arc<dyn WorkflowService>,
    ) -> Self {
        Self {
            wait_policy: WaitPolicy::from(config),
            infra_stack_name: config.infra_stack_name.clone(),
            pipeline_stack_name: config.pipeline_stack_name.clone(),
            trigger_source: config.trigger_source.clone(),
            ..Self::new(stacks, workflows)
        }
    }

    pub fn with_wait_policy(mut self, policy: WaitPolicy) -> Self {
        self.wait_policy = policy;
        self
    }

    pub fn wait_policy(&self) -> &WaitPolicy {
        &self.wait_policy
    }

    pub fn trigger_source(&self) -> &str {
        &self.trigger_source
    }

    pub fn stacks(&self) -> &dyn DeployStackService {
        self.stacks.as_ref()
    }

    pub fn workflows(&self) -> &dyn WorkflowService {
        self.workflows.as_ref()
    }

    /// Describes a stack by name
    pub async fn describe(&self, stack_name: &str) -> iris_client::Result<StackDescriptor> {
        self.stacks.describe_stack(stack_name).await
    }

    /// Runs the full flow for one deploy event
    pub async fn handle(&self, event: DeployEvent) -> DeployResponse {
        let span = info_span!("deploy", invocation = %Uuid::new_v4());

        async move {
            let mut progress = Progress::new();

            match self.run(event, &mut progress).await {
                Ok(execution) => {
                    info!("Deployment flow finished");
                    DeployResponse::ok(
                        progress.stacks,
                        progress.infra_outputs.unwrap_or_default(),
                        progress.pipeline_outputs.unwrap_or_default(),
                        execution.map(|e| e.execution_arn),
                    )
                }
                Err(err) => {
                    error!("[{}] {}", progress.stage, err);
                    progress.into_error_response(err)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn run(
        &self,
        event: DeployEvent,
        progress: &mut Progress,
    ) -> Result<Option<WorkflowExecution>> {
        progress.enter(Stage::Validate);
        let plan = self.plan(event)?;

        progress.enter(Stage::DeployInfra);
        let infra_result = self.deploy(&plan.infra, progress).await?;

        progress.enter(Stage::WaitInfra);
        let infra_desc = self.settle(&infra_result).await?;

        progress.enter(Stage::ExtractInfraOutputs);
        let infra_outputs = extract_outputs(&infra_desc);
        info!("Infra outputs: {:?}", infra_outputs);
        progress.infra_outputs = Some(infra_outputs.clone());

        progress.enter(Stage::ValidateInfraOutputs);
        validate_outputs(&plan.infra.stack_name, &infra_outputs, &REQUIRED_INFRA_OUTPUTS)?;

        progress.enter(Stage::DeployPipeline);
        let pipeline_request =
            DeployRequest::new(plan.pipeline_stack_name, plan.pipeline_template_location)
                .with_parameters(merge_outputs(
                    plan.pipeline_parameters,
                    &infra_outputs,
                    &REQUIRED_INFRA_OUTPUTS,
                ))
                .with_capabilities(plan.capabilities);
        let pipeline_result = self.deploy(&pipeline_request, progress).await?;

        progress.enter(Stage::WaitPipeline);
        let pipeline_desc = self.settle(&pipeline_result).await?;

        progress.enter(Stage::ExtractPipelineOutputs);
        let pipeline_outputs = extract_outputs(&pipeline_desc);
        info!("Pipeline outputs: {:?}", pipeline_outputs);
        progress.pipeline_outputs = Some(pipeline_outputs.clone());

        progress.enter(Stage::TriggerWorkflow);
        let execution = match find_state_machine_arn(&pipeline_outputs) {
            Some(arn) => Some(
                start_workflow(
                    self.workflows.as_ref(),
                    arn,
                    plan.execution_input,
                    &self.trigger_source,
                )
                .await?,
            ),
            None => {
                warn!("No state machine ARN in pipeline outputs, not starting a workflow");
                None
            }
        };

        progress.enter(Stage::Done);
        Ok(execution)
    }

    fn plan(&self, event: DeployEvent) -> Result<Plan> {
        let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());

        let (Some(infra_template), Some(pipeline_template)) = (
            non_empty(event.infra_template_location),
            non_empty(event.pipeline_template_location),
        ) else {
            return Err(OrchestratorError::Validation(
                "InfraTemplateLocation and PipelineTemplateLocation are required".to_string(),
            ));
        };

        let infra_stack_name = non_empty(event.infra_stack_name)
            .unwrap_or_else(|| self.infra_stack_name.clone());
        let pipeline_stack_name = non_empty(event.pipeline_stack_name)
            .unwrap_or_else(|| self.pipeline_stack_name.clone());

        Ok(Plan {
            infra: DeployRequest::new(infra_stack_name, infra_template)
                .with_parameters(event.infra_parameters)
                .with_capabilities(event.capabilities.clone()),
            pipeline_stack_name,
            pipeline_template_location: pipeline_template,
            pipeline_parameters: event.pipeline_parameters,
            capabilities: event.capabilities,
            execution_input: event.execution_input,
        })
    }

    /// Deploys one stack, recording the result either way
    async fn deploy(
        &self,
        request: &DeployRequest,
        progress: &mut Progress,
    ) -> Result<DeployResult> {
        match deploy_stack(self.stacks.as_ref(), request).await {
            Ok(result) => {
                progress.stacks.push(result.clone());
                Ok(result)
            }
            Err(err) => {
                progress
                    .stacks
                    .push(DeployResult::error(&request.stack_name, err.to_string()));
                Err(err)
            }
        }
    }

    /// Waits for a started deployment, or reads the current state of an unchanged one
    async fn settle(&self, result: &DeployResult) -> Result<StackDescriptor> {
        if result.is_started() {
            return wait_for_stack(self.stacks.as_ref(), &result.stack_name, &self.wait_policy)
                .await;
        }

        info!("{} unchanged, describing current state", result.stack_name);
        let desc = self
            .stacks
            .describe_stack(&result.stack_name)
            .await
            .map_err(|source| OrchestratorError::StackQuery {
                stack: result.stack_name.clone(),
                source,
            })?;
        info!("{} status={}", desc.stack_name, desc.raw_status);

        Ok(desc)
    }
}
