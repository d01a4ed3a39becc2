//! CloudFormation-backed stack service

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudformation::types::{Capability, Parameter, Stack};
use iris_core::domain::deploy::DeployRequest;
use iris_core::domain::stack::StackDescriptor;
use iris_core::template::resolve_template_url;
use tracing::debug;

use crate::error::{ClientError, Operation, Result};
use crate::service::DeployStackService;

/// [`DeployStackService`] implementation over the CloudFormation API
#[derive(Debug, Clone)]
pub struct CloudFormationClient {
    client: aws_sdk_cloudformation::Client,
}

impl CloudFormationClient {
    /// Creates a client from a loaded SDK configuration
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_cloudformation::Client::new(config),
        }
    }

    /// Wraps an already configured SDK client
    pub fn with_client(client: aws_sdk_cloudformation::Client) -> Self {
        Self { client }
    }

    fn parameters(request: &DeployRequest) -> Vec<Parameter> {
        request
            .parameters
            .iter()
            .map(|(key, value)| {
                Parameter::builder()
                    .parameter_key(key)
                    .parameter_value(value)
                    .build()
            })
            .collect()
    }

    fn capabilities(request: &DeployRequest) -> Vec<Capability> {
        request
            .capabilities
            .iter()
            .map(|c| Capability::from(c.as_str()))
            .collect()
    }
}

/// Converts an SDK stack into a descriptor
fn to_descriptor(stack_name: &str, stack: &Stack) -> Result<StackDescriptor> {
    let raw_status = stack
        .stack_status()
        .map(|s| s.as_str().to_string())
        .ok_or_else(|| ClientError::MalformedResponse {
            operation: Operation::DescribeStacks,
            subject: stack_name.to_string(),
            message: "stack has no status".to_string(),
        })?;

    let mut descriptor = StackDescriptor::new(stack.stack_name().unwrap_or(stack_name), raw_status);
    descriptor.stack_id = stack.stack_id().map(str::to_string);
    descriptor.status_reason = stack.stack_status_reason().map(str::to_string);

    for output in stack.outputs() {
        if let (Some(key), Some(value)) = (output.output_key(), output.output_value()) {
            descriptor.outputs.insert(key.to_string(), value.to_string());
        }
    }

    Ok(descriptor)
}

#[async_trait]
impl DeployStackService for CloudFormationClient {
    async fn describe_stack(&self, stack_name: &str) -> Result<StackDescriptor> {
        let output = self
            .client
            .describe_stacks()
            .stack_name(stack_name)
            .send()
            .await
            .map_err(|e| ClientError::from_sdk(Operation::DescribeStacks, stack_name, e))?;

        let stack = output
            .stacks()
            .first()
            .ok_or_else(|| ClientError::StackNotFound(stack_name.to_string()))?;

        to_descriptor(stack_name, stack)
    }

    async fn create_stack(&self, request: &DeployRequest) -> Result<Option<String>> {
        let template_url = resolve_template_url(&request.template_location);
        debug!(
            "CreateStack {} TemplateURL={}",
            request.stack_name, template_url
        );

        let output = self
            .client
            .create_stack()
            .stack_name(&request.stack_name)
            .template_url(template_url)
            .set_parameters(Some(Self::parameters(request)))
            .set_capabilities(Some(Self::capabilities(request)))
            .send()
            .await
            .map_err(|e| ClientError::from_sdk(Operation::CreateStack, &request.stack_name, e))?;

        Ok(output.stack_id().map(str::to_string))
    }

    async fn update_stack(&self, request: &DeployRequest) -> Result<Option<String>> {
        let template_url = resolve_template_url(&request.template_location);
        debug!(
            "UpdateStack {} TemplateURL={}",
            request.stack_name, template_url
        );

        let output = self
            .client
            .update_stack()
            .stack_name(&request.stack_name)
            .template_url(template_url)
            .set_parameters(Some(Self::parameters(request)))
            .set_capabilities(Some(Self::capabilities(request)))
            .send()
            .await
            .map_err(|e| ClientError::from_sdk(Operation::UpdateStack, &request.stack_name, e))?;

        Ok(output.stack_id().map(str::to_string))
    }
}
