//! Error responses produced by the relay

use crate::upstream::UpstreamError;
use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use mockadmin_common::ValidationError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Failed to {action}")]
    Upstream {
        action: &'static str,
        #[source]
        source: UpstreamError,
    },
}

impl ApiError {
    /// Wrap an upstream failure for `map_err`, naming what the relay was doing
    pub fn upstream(action: &'static str) -> impl FnOnce(UpstreamError) -> ApiError {
        move |source| ApiError::Upstream { action, source }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Validation(_) | ApiError::InvalidRequest(_) => {
                tracing::warn!("Rejected request: {}", self);
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": self.to_string() })),
                )
                    .into_response()
            }
            ApiError::Upstream { action, source } => {
                tracing::error!("Error trying to {}: {}", action, source);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": self.to_string(),
                        "details": source.details()
                    })),
                )
                    .into_response()
            }
        }
    }
}
