//! API Module
//!
//! HTTP trigger API for the orchestrator.

pub mod deploy;
pub mod error;
pub mod health;
pub mod stack;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::service::Orchestrator;

/// Shared state of every route
pub type AppState = Arc<Orchestrator>;

/// Create the main API router with all endpoints
pub fn create_router(orchestrator: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/deploy", post(deploy::deploy))
        .route("/api/stacks/{name}", get(stack::get_stack))
        .with_state(orchestrator)
        .layer(TraceLayer::new_for_http())
}
