//! Error handling for the Rice Quality Analyzer
//!
//! Provides consistent JSON error responses across all handlers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Upload is empty, not a decodable image, or an unsupported format
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Missing or invalid credential / setting
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external inference call failed; no report is produced
    #[error("Inference error: {0}")]
    Inference(String),

    /// Unknown session, or a report/image requested before it exists
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Document assembly failed
    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::InvalidImage(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_IMAGE".to_string(),
                    message: format!("Invalid image: {}", msg),
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                },
            ),
            AppError::Inference(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "INFERENCE_ERROR".to_string(),
                    message: format!("Analysis failed, try again: {}", msg),
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                },
            ),
            AppError::Render(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "RENDER_ERROR".to_string(),
                    message: format!("Failed to render report: {}", msg),
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                },
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
