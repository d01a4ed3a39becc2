//! Iris Core
//!
//! Core types shared by the Iris deployment orchestrator, its service clients
//! and the CLI.
//!
//! This crate contains:
//! - Domain types: stacks, deploy requests/results, workflow executions, flow stages
//! - DTOs: the handler event and response records
//! - Template location resolution

pub mod domain;
pub mod dto;
pub mod template;
