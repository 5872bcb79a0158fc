//! Unified error system for the Curio tagging engine
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes
//! - [`ErrorCategory`]: Classification of errors by code range
//! - [`ErrorKind`]: The not-found / remote / validation split callers act on
//! - [`AppError`]: Rich error type with codes, messages, and details
//! - [`ApiResponse`]: Unified API response envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Framework errors
//! - 2xxx: Tag errors
//! - 9xxx: System and remote errors
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode, ApiResponse};
//!
//! let err = AppError::new(ErrorCode::FrameworkNotFound);
//! assert!(err.is_not_found());
//!
//! let err = AppError::required_value("License");
//! assert_eq!(err.tag_key(), Some("License"));
//!
//! let response = ApiResponse::<()>::error(&err);
//! assert_eq!(response.code, Some(2003));
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::{ErrorCategory, ErrorKind};
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult};
