//! Core domain types
//!
//! These types describe the two deployments the orchestrator drives and the
//! workflow run it starts. They are shared between the service clients (which
//! produce them from provider responses) and the orchestrator (which consumes them).

pub mod deploy;
pub mod stack;
pub mod stage;
pub mod workflow;
