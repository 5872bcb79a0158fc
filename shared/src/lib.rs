//! Shared types for the Curio tagging engine
//!
//! Tag data model, the unified error system and the API response envelope.
//! These types are shared between curio-engine, curio-client and whatever
//! service persists frameworks and tags.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode, ErrorKind};
pub use models::{
    AssetTag, BulkPolicy, BulkTagRequest, FrameworkFilter, TagFramework, TagKey, TagTemplate,
    TagValue, ValueType,
};
pub use serde::{Deserialize, Serialize};
