//! Client error types

use shared::error::{AppError, ErrorCode};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Base URL cannot carry path segments
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),

    /// The service answered with an error envelope or a bare error status
    #[error("{message}")]
    Api {
        code: ErrorCode,
        message: String,
        details: Option<HashMap<String, Value>>,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<AppError> for ClientError {
    fn from(err: AppError) -> Self {
        Self::Api {
            code: err.code,
            message: err.message,
            details: err.details,
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                code,
                message,
                details,
            } => {
                let mut app = AppError::with_message(code, message);
                app.details = details;
                app
            }
            ClientError::Http(e) if e.is_timeout() => {
                AppError::with_message(ErrorCode::TimeoutError, e.to_string())
            }
            ClientError::Http(e) if e.is_connect() => {
                AppError::with_message(ErrorCode::NetworkError, e.to_string())
            }
            ClientError::InvalidUrl(url) => AppError::validation(format!("Invalid base URL: {}", url)),
            other => AppError::remote(other.to_string()),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
