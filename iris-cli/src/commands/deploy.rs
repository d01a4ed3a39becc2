//! Deploy command handler
//!
//! Runs the full deploy flow locally against the configured AWS account.

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use iris_core::domain::deploy::{DeployResult, DeployStatus};
use iris_core::domain::stack::OutputMap;
use iris_core::dto::deploy::{DeployEvent, DeployResponse};
use serde_json::Value as JsonValue;
use tracing::info;

use super::parse_json;
use crate::config::Config;

/// Arguments of `iris deploy`
#[derive(Args, Debug)]
pub struct DeployArgs {
    /// Infra stack template (s3:// or https:// URI)
    #[arg(long)]
    infra_template: Option<String>,

    /// Pipeline stack template (s3:// or https:// URI)
    #[arg(long)]
    pipeline_template: Option<String>,

    /// Infra stack name
    #[arg(long)]
    infra_stack: Option<String>,

    /// Pipeline stack name
    #[arg(long)]
    pipeline_stack: Option<String>,

    /// Infra stack parameter as KEY=value (repeatable)
    #[arg(long, value_parser = parse_key_val)]
    infra_param: Vec<(String, String)>,

    /// Pipeline stack parameter as KEY=value (repeatable)
    #[arg(long, value_parser = parse_key_val)]
    pipeline_param: Vec<(String, String)>,

    /// Capability to acknowledge, e.g. CAPABILITY_NAMED_IAM (repeatable)
    #[arg(long)]
    capability: Vec<String>,

    /// Workflow execution input as a JSON document
    #[arg(long, value_parser = parse_json)]
    input: Option<JsonValue>,

    /// Read the deploy event from a JSON file; flags override its fields
    #[arg(long)]
    event: Option<String>,

    /// Print the raw response as JSON
    #[arg(long)]
    json: bool,
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Handle `iris deploy`
pub async fn handle_deploy(args: DeployArgs, config: &Config) -> Result<()> {
    let base = match &args.event {
        Some(path) => read_event(path)?,
        None => DeployEvent::default(),
    };
    let json = args.json;
    let event = build_event(base, args);

    let orchestrator = config.connect().await;
    let response = orchestrator.handle(event).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_response(&response);
    }

    if !response.is_ok() {
        anyhow::bail!(
            "deploy failed: {}",
            response.message.as_deref().unwrap_or("unknown error")
        );
    }

    Ok(())
}

fn read_event(path: &str) -> Result<DeployEvent> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read event file: {}", path))?;

    let event = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse deploy event from {}", path))?;
    info!("Loaded deploy event from {}", path);

    Ok(event)
}

/// Applies command line flags on top of an event
fn build_event(mut event: DeployEvent, args: DeployArgs) -> DeployEvent {
    if args.infra_template.is_some() {
        event.infra_template_location = args.infra_template;
    }
    if args.pipeline_template.is_some() {
        event.pipeline_template_location = args.pipeline_template;
    }
    if args.infra_stack.is_some() {
        event.infra_stack_name = args.infra_stack;
    }
    if args.pipeline_stack.is_some() {
        event.pipeline_stack_name = args.pipeline_stack;
    }
    if args.input.is_some() {
        event.execution_input = args.input;
    }

    event.infra_parameters.extend(args.infra_param);
    event.pipeline_parameters.extend(args.pipeline_param);

    for capability in args.capability {
        if !event.capabilities.contains(&capability) {
            event.capabilities.push(capability);
        }
    }

    event
}

fn print_response(response: &DeployResponse) {
    if response.is_ok() {
        println!("{}", "✓ Deployment finished".green().bold());
    } else {
        println!("{}", "✗ Deployment failed".red().bold());
        if let Some(stage) = response.failed_stage {
            println!("  Stage:   {}", stage.to_string().yellow());
        }
        if let Some(message) = &response.message {
            println!("  Error:   {}", message);
        }
    }

    if !response.stacks.is_empty() {
        println!("\n{}", "Stacks:".bold());
        for stack in &response.stacks {
            print_stack_result(stack);
        }
    }

    if let Some(outputs) = &response.infra_outputs {
        print_outputs("Infra outputs:", outputs);
    }
    if let Some(outputs) = &response.pipeline_outputs {
        print_outputs("Pipeline outputs:", outputs);
    }

    if let Some(missing) = &response.missing_outputs {
        println!("\n{} {}", "Missing outputs:".bold(), missing.join(", ").red());
    }

    match &response.execution_arn {
        Some(arn) => println!("\n{} {}", "Execution:".bold(), arn.cyan()),
        None if response.is_ok() => {
            println!("\n{}", "No state machine output found; no workflow started".yellow())
        }
        None => {}
    }
}

fn print_stack_result(result: &DeployResult) {
    let status = match result.status {
        DeployStatus::CreateStarted | DeployStatus::UpdateStarted => {
            result.status.to_string().green()
        }
        DeployStatus::NoChange => result.status.to_string().dimmed(),
        DeployStatus::Error => result.status.to_string().red(),
    };
    println!("  {} {} {}", "▸".cyan(), result.stack_name.bold(), status);
    if let Some(message) = &result.message {
        println!("    {}", message.dimmed());
    }
}

pub(super) fn print_outputs(title: &str, outputs: &OutputMap) {
    println!("\n{}", title.bold());
    if outputs.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for (key, value) in outputs {
        println!("  {:<24} {}", key.cyan(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: DeployArgs,
    }

    fn parse(argv: &[&str]) -> DeployArgs {
        TestCli::parse_from(std::iter::once("iris").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("ProjectName=iris").unwrap(),
            ("ProjectName".to_string(), "iris".to_string())
        );
        assert_eq!(
            parse_key_val("Query=a=b").unwrap(),
            ("Query".to_string(), "a=b".to_string())
        );
        assert!(parse_key_val("no-separator").is_err());
    }

    #[test]
    fn test_flags_build_event() {
        let args = parse(&[
            "--infra-template",
            "s3://b/infra.yaml",
            "--pipeline-template",
            "s3://b/pipeline.yaml",
            "--infra-param",
            "ProjectName=iris",
            "--pipeline-param",
            "N_Estimators=20",
            "--capability",
            "CAPABILITY_NAMED_IAM",
            "--input",
            r#"{"dataset":"iris"}"#,
        ]);

        let event = build_event(DeployEvent::default(), args);

        assert_eq!(event.infra_template_location.as_deref(), Some("s3://b/infra.yaml"));
        assert_eq!(event.infra_parameters["ProjectName"], "iris");
        assert_eq!(event.pipeline_parameters["N_Estimators"], "20");
        assert_eq!(event.capabilities, vec!["CAPABILITY_NAMED_IAM".to_string()]);
        assert_eq!(event.execution_input.unwrap()["dataset"], "iris");
        assert!(event.infra_stack_name.is_none());
    }

    #[test]
    fn test_flags_override_event_file() {
        let base: DeployEvent = serde_json::from_value(serde_json::json!({
            "InfraTemplateS3": "s3://b/old-infra.yaml",
            "PipelineTemplateLocation": "s3://b/pipeline.yaml",
            "InfraParameters": { "ProjectName": "old", "Env": "dev" },
            "Capabilities": ["CAPABILITY_NAMED_IAM"]
        }))
        .unwrap();
        let args = parse(&[
            "--infra-template",
            "s3://b/infra.yaml",
            "--infra-param",
            "ProjectName=iris",
            "--capability",
            "CAPABILITY_NAMED_IAM",
        ]);

        let event = build_event(base, args);

        assert_eq!(event.infra_template_location.as_deref(), Some("s3://b/infra.yaml"));
        assert_eq!(
            event.pipeline_template_location.as_deref(),
            Some("s3://b/pipeline.yaml")
        );
        assert_eq!(event.infra_parameters["ProjectName"], "iris");
        assert_eq!(event.infra_parameters["Env"], "dev");
        assert_eq!(event.capabilities.len(), 1);
    }

    #[test]
    fn test_invalid_input_is_rejected() {
        let result = TestCli::try_parse_from(["iris", "--input", "{not json"]);
        assert!(result.is_err());
    }
}
