//! Stack API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use iris_core::domain::stack::StackDescriptor;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};

/// GET /api/stacks/{name}
/// Current status and outputs of a stack
pub async fn get_stack(
    State(orchestrator): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<StackDescriptor>> {
    tracing::debug!("Describing stack: {}", name);

    let desc = orchestrator
        .describe(&name)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(desc))
}
