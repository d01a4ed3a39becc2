//! API Error Handling
//!
//! Unified error type and conversion for API responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use iris_client::{ClientError, ErrorKind};

/// API error type
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    /// A cloud service call failed
    Upstream(ClientError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Upstream(err) => {
                tracing::error!("Upstream error: {}", err);
                (StatusCode::BAD_GATEWAY, err.to_string())
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err.kind() {
            ErrorKind::NotFound => ApiError::NotFound(err.to_string()),
            _ => ApiError::Upstream(err),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
