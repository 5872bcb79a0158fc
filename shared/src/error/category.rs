//! Error category and kind classification

use super::codes::ErrorCode;
use serde::{Deserialize, Serialize};

/// Error category classification based on error code ranges
///
/// - 0xxx: General errors
/// - 1xxx: Framework errors
/// - 2xxx: Tag errors
/// - 9xxx: System errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// General errors (0xxx)
    General,
    /// Framework errors (1xxx)
    Framework,
    /// Tag errors (2xxx)
    Tag,
    /// System errors (9xxx and anything unassigned)
    System,
}

impl ErrorCategory {
    /// Determine category from error code value
    pub fn from_code(code: u16) -> Self {
        match code {
            0..1000 => Self::General,
            1000..2000 => Self::Framework,
            2000..3000 => Self::Tag,
            _ => Self::System,
        }
    }

    /// Get the string name for this category
    pub fn name(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Framework => "framework",
            Self::Tag => "tag",
            Self::System => "system",
        }
    }
}

/// How a caller should react to an error.
///
/// `NotFound` and `Remote` come from the collaborators, `Validation` blocks a
/// commit, `Internal` is everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Remote,
    Validation,
    Internal,
}

impl ErrorCode {
    /// Get the category for this error code
    pub fn category(&self) -> ErrorCategory {
        ErrorCategory::from_code(self.code())
    }

    /// Get the kind for this error code
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound | Self::FrameworkNotFound | Self::TagNotFound => ErrorKind::NotFound,

            Self::RemoteError | Self::NetworkError | Self::TimeoutError => ErrorKind::Remote,

            Self::ValidationFailed
            | Self::AlreadyExists
            | Self::TagValueMismatch
            | Self::TagValueRequired
            | Self::DuplicateTagKey
            | Self::EmptyTagList
            | Self::EmptyTargetList
            | Self::FrameworkTagLocked
            | Self::InvalidTagKey => ErrorKind::Validation,

            Self::Success | Self::Unknown | Self::InternalError => ErrorKind::Internal,
        }
    }
}
