//! Iris Service Clients
//!
//! The boundary between the orchestrator and the cloud services it drives.
//!
//! This crate provides:
//! - Capability traits ([`DeployStackService`], [`WorkflowService`]) the orchestrator is written against
//! - AWS implementations backed by CloudFormation and Step Functions
//! - Typed error classification, so callers branch on [`ErrorKind`] only
//!
//! # Example
//!
//! ```no_run
//! use iris_client::{CloudFormationClient, DeployStackService, load_sdk_config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = load_sdk_config(Some("eu-north-1")).await;
//!     let stacks = CloudFormationClient::new(&config);
//!
//!     let desc = stacks.describe_stack("iris-mlops-infra").await?;
//!     println!("{} is {}", desc.stack_name, desc.raw_status);
//!     Ok(())
//! }
//! ```

mod cloudformation;
pub mod error;
mod service;
mod stepfunctions;

// Re-export commonly used types
pub use cloudformation::CloudFormationClient;
pub use error::{ClientError, ErrorKind, Operation, Result};
pub use service::{DeployStackService, WorkflowService};
pub use stepfunctions::StepFunctionsClient;

use aws_config::{BehaviorVersion, Region, SdkConfig};

/// Loads AWS configuration from the default credential and region chain
///
/// # Arguments
/// * `region` - Overrides the region from the environment/profile when given
pub async fn load_sdk_config(region: Option<&str>) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = region {
        loader = loader.region(Region::new(region.to_string()));
    }
    loader.load().await
}
