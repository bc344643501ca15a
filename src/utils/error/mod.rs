//! Error handling for the orchestrator
//!
//! This module defines all error types used throughout the service.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

/// Result type alias for the orchestrator
pub type Result<T> = std::result::Result<T, OrchestratorError>;

/// Main error type for the orchestrator
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unknown batch type in a submission
    #[error("Unsupported batch type: {0}")]
    UnsupportedBatchType(String),

    /// Non-success response from a downstream collaborator
    #[error("{service} collaborator returned status {status}: {message}")]
    Collaborator {
        /// Which collaborator failed (validation, document-processing, storage)
        service: String,
        /// Downstream HTTP status code
        status: u16,
        /// Downstream status text or response body
        message: String,
    },

    /// Checkpoint store errors
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for OrchestratorError {
    fn status_code(&self) -> StatusCode {
        match self {
            OrchestratorError::Validation(_) | OrchestratorError::UnsupportedBatchType(_) => {
                StatusCode::BAD_REQUEST
            }
            OrchestratorError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        // Internal detail stays out of the response body
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(serde_json::json!({
            "success": false,
            "error": message,
        }))
    }
}
