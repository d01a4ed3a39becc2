//! Iris Orchestrator
//!
//! Deploys the infra and pipeline stacks in order, wires infra outputs into
//! the pipeline stack, and starts the pipeline's state machine.
//!
//! The same [`service::Orchestrator`] backs the HTTP trigger server in this
//! crate and the `iris` command line tool.

pub mod api;
pub mod config;
pub mod error;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::Config;
pub use error::{OrchestratorError, Result};
pub use service::Orchestrator;
