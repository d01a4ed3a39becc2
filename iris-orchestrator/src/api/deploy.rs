//! Deploy API Handler
//!
//! Runs the full deploy flow for one request. The body is always the
//! response record; the HTTP status only summarises it.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use iris_core::domain::stage::Stage;
use iris_core::dto::deploy::{DeployEvent, DeployResponse};

use crate::api::AppState;

/// POST /api/deploy
pub async fn deploy(
    State(orchestrator): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<DeployResponse>) {
    let response = match serde_json::from_slice::<DeployEvent>(&body) {
        Ok(event) => orchestrator.handle(event).await,
        Err(e) => {
            tracing::warn!("Rejecting malformed deploy request: {}", e);
            DeployResponse::error(Stage::Validate, format!("Validation error: {}", e))
        }
    };

    (status_code(&response), Json(response))
}

fn status_code(response: &DeployResponse) -> StatusCode {
    if response.is_ok() {
        StatusCode::OK
    } else if response.failed_stage == Some(Stage::Validate) {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}
