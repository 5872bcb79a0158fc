//! Error types and API response structures

use super::category::ErrorKind;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// This is the error type surfaced by every I/O-bound part of the engine:
/// - Standardized error codes via [`ErrorCode`]
/// - Human-readable messages
/// - Optional structured details (`key` names the offending tag)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (tag key, resource, remote status, ...)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get a detail entry
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }

    /// Resolved key of the tag this error is about, if any
    pub fn tag_key(&self) -> Option<&str> {
        self.detail("key").and_then(Value::as_str)
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    /// Get the caller-facing kind of this error
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_remote(&self) -> bool {
        self.kind() == ErrorKind::Remote
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Create a framework not found error
    pub fn framework_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(
            ErrorCode::FrameworkNotFound,
            format!("Tag framework {} not found", id),
        )
        .with_detail("framework_id", id)
    }

    /// Create a tag not found error
    pub fn tag_not_found(uuid: impl Into<String>) -> Self {
        let uuid = uuid.into();
        Self::with_message(ErrorCode::TagNotFound, format!("Tag {} not found", uuid))
            .with_detail("uuid", uuid)
    }

    /// Create a remote error, keeping the underlying cause in the message
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::RemoteError, msg)
    }

    /// A required tag was left without a value
    pub fn required_value(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::with_message(
            ErrorCode::TagValueRequired,
            format!("Tag '{}' requires a value", key),
        )
        .with_detail("key", key)
    }

    /// A tag value does not fit its template
    pub fn value_mismatch(key: impl Into<String>, reason: impl Into<String>) -> Self {
        let key = key.into();
        Self::with_message(
            ErrorCode::TagValueMismatch,
            format!("Tag '{}': {}", key, reason.into()),
        )
        .with_detail("key", key)
    }

    /// Another tag already uses this resolved key
    pub fn duplicate_key(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::with_message(
            ErrorCode::DuplicateTagKey,
            format!("A tag with key '{}' already exists", key),
        )
        .with_detail("key", key)
    }

    /// A tag whose resolved key is blank
    pub fn blank_key(uuid: impl Into<String>) -> Self {
        let uuid = uuid.into();
        Self::with_message(ErrorCode::InvalidTagKey, format!("Tag {} has a blank key", uuid))
            .with_detail("uuid", uuid)
    }

    /// Framework-derived tags keep their template key
    pub fn framework_tag_locked(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::with_message(
            ErrorCode::FrameworkTagLocked,
            format!("Tag '{}' comes from a framework and cannot be renamed", key),
        )
        .with_detail("key", key)
    }

    /// Bulk apply without tags
    pub fn empty_tag_list() -> Self {
        Self::new(ErrorCode::EmptyTagList)
    }

    /// Bulk apply without target files
    pub fn empty_target_list() -> Self {
        Self::new(ErrorCode::EmptyTargetList)
    }
}

/// Unified API response structure
///
/// Provides a consistent envelope for every collaborator endpoint:
/// - `code`: Error code (0 for success)
/// - `message`: Human-readable message
/// - `data`: Response payload (on success)
/// - `details`: Additional error details (on failure)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: Some(data),
            details: None,
        }
    }

    /// Whether the envelope reports success
    pub fn is_success(&self) -> bool {
        matches!(self.code, None | Some(0))
    }

    /// Convert the envelope back into the error it carries.
    ///
    /// Unknown codes become [`ErrorCode::RemoteError`] so the original
    /// message is never lost.
    pub fn into_error(self) -> AppError {
        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(ErrorCode::RemoteError);
        let mut err = AppError::with_message(code, self.message);
        err.details = self.details;
        err
    }
}

impl ApiResponse<()> {
    /// Create a success response without data
    pub fn ok() -> Self {
        Self {
            code: Some(0),
            message: "OK".to_string(),
            data: None,
            details: None,
        }
    }

    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);

        if matches!(self.code.category(), super::category::ErrorCategory::System) {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.is_success() {
            StatusCode::OK
        } else {
            ErrorCode::try_from(self.code.unwrap_or(1))
                .map(|c| c.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::NotFound);
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Resource not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_required_value_names_key() {
        let err = AppError::required_value("License");
        assert_eq!(err.code, ErrorCode::TagValueRequired);
        assert_eq!(err.tag_key(), Some("License"));
        assert!(err.is_validation());
        assert!(err.to_string().contains("License"));
    }

    #[test]
    fn test_error_kinds() {
        assert!(AppError::framework_not_found("fw-1").is_not_found());
        assert!(AppError::remote("connection reset").is_remote());
        assert!(AppError::empty_tag_list().is_validation());
        assert!(AppError::empty_target_list().is_validation());
        assert!(!AppError::new(ErrorCode::InternalError).is_remote());
    }

    #[test]
    fn test_tag_constructors_carry_identity() {
        let err = AppError::blank_key("t-1");
        assert_eq!(err.code, ErrorCode::InvalidTagKey);
        assert_eq!(err.detail("uuid"), Some(&serde_json::json!("t-1")));

        let err = AppError::framework_tag_locked("Subject");
        assert_eq!(err.code, ErrorCode::FrameworkTagLocked);
        assert_eq!(err.tag_key(), Some("Subject"));
        assert!(err.is_validation());
    }

    #[test]
    fn test_api_response_success() {
        let resp = ApiResponse::success(vec![1, 2]);
        assert!(resp.is_success());
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["code"], 0);
        assert_eq!(json["data"], serde_json::json!([1, 2]));
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_api_response_error_round_trip() {
        let err = AppError::duplicate_key("Subject");
        let resp: ApiResponse<()> = err.into();
        let json = serde_json::to_string(&resp).unwrap();

        let back: ApiResponse<()> = serde_json::from_str(&json).unwrap();
        assert!(!back.is_success());
        let err = back.into_error();
        assert_eq!(err.code, ErrorCode::DuplicateTagKey);
        assert_eq!(err.tag_key(), Some("Subject"));
    }

    #[test]
    fn test_unknown_code_becomes_remote() {
        let resp: ApiResponse<()> = ApiResponse {
            code: Some(4242),
            message: "upstream exploded".to_string(),
            data: None,
            details: None,
        };
        let err = resp.into_error();
        assert_eq!(err.code, ErrorCode::RemoteError);
        assert_eq!(err.message, "upstream exploded");
    }
}
