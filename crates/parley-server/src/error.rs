//! Unified error handling for the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use parley_core::InterviewError;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

/// Application error types
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// No completion client configured
    ServiceUnavailable(String),
    /// The completion service failed; details are logged, not returned
    Upstream,
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::NotFound(msg) => ("NOT_FOUND", msg),
            AppError::BadRequest(msg) => ("BAD_REQUEST", msg),
            AppError::ServiceUnavailable(msg) => ("SERVICE_UNAVAILABLE", msg),
            AppError::Upstream => (
                "UPSTREAM_ERROR",
                "The language model service failed to respond".to_string(),
            ),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg),
        };

        (
            status,
            Json(ApiError {
                error: message,
                code: code.to_string(),
            }),
        )
            .into_response()
    }
}

impl From<InterviewError> for AppError {
    fn from(err: InterviewError) -> Self {
        match err {
            InterviewError::EmptyMessage => AppError::BadRequest(err.to_string()),
            InterviewError::Completion(e) => {
                tracing::error!("Completion failed: {:?}", e);
                AppError::Upstream
            }
            InterviewError::PlanParse(msg) => {
                tracing::error!("Plan parse failed: {}", msg);
                AppError::Internal("Could not build an interview plan".to_string())
            }
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        // Log full error chain for debugging, return sanitized message to client
        tracing::error!("Internal error: {:?}", err);
        AppError::Internal("Internal server error".to_string())
    }
}
