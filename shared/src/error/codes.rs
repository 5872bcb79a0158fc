//! Unified error codes for the Curio tagging engine
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Framework errors
//! - 2xxx: Tag errors
//! - 9xxx: System and remote errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so they survive the trip
/// through the JSON envelope unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,

    // ==================== 1xxx: Framework ====================
    /// Tag framework not found
    FrameworkNotFound = 1001,

    // ==================== 2xxx: Tag ====================
    /// Tag not found in the working set
    TagNotFound = 2001,
    /// Tag value does not match the template value type
    TagValueMismatch = 2002,
    /// Required tag has no value
    TagValueRequired = 2003,
    /// Another tag already uses this key
    DuplicateTagKey = 2004,
    /// Bulk apply called without tags
    EmptyTagList = 2005,
    /// Bulk apply called without target files
    EmptyTargetList = 2006,
    /// Framework-derived tag keys cannot be renamed
    FrameworkTagLocked = 2007,
    /// Tag key is blank
    InvalidTagKey = 2008,

    // ==================== 9xxx: System ====================
    /// Internal error
    InternalError = 9001,
    /// Remote collaborator reported a failure
    RemoteError = 9002,
    /// Network transport failure
    NetworkError = 9003,
    /// Operation timed out
    TimeoutError = 9004,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",

            // Framework
            ErrorCode::FrameworkNotFound => "Tag framework not found",

            // Tag
            ErrorCode::TagNotFound => "Tag not found",
            ErrorCode::TagValueMismatch => "Tag value does not match its template",
            ErrorCode::TagValueRequired => "Tag value is required",
            ErrorCode::DuplicateTagKey => "A tag with this key already exists",
            ErrorCode::EmptyTagList => "No tags supplied",
            ErrorCode::EmptyTargetList => "No target files supplied",
            ErrorCode::FrameworkTagLocked => "Framework tag keys cannot be changed",
            ErrorCode::InvalidTagKey => "Tag key is blank",

            // System
            ErrorCode::InternalError => "Internal error",
            ErrorCode::RemoteError => "Remote service error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error returned when converting an unknown u16 into an [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),

            // Framework
            1001 => Ok(ErrorCode::FrameworkNotFound),

            // Tag
            2001 => Ok(ErrorCode::TagNotFound),
            2002 => Ok(ErrorCode::TagValueMismatch),
            2003 => Ok(ErrorCode::TagValueRequired),
            2004 => Ok(ErrorCode::DuplicateTagKey),
            2005 => Ok(ErrorCode::EmptyTagList),
            2006 => Ok(ErrorCode::EmptyTargetList),
            2007 => Ok(ErrorCode::FrameworkTagLocked),
            2008 => Ok(ErrorCode::InvalidTagKey),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::RemoteError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
