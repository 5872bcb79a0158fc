//! Curio Engine - dynamic asset tagging
//!
//! Merges framework-defined fields with ad-hoc per-file tags and renders
//! them as compact chip summaries.
//!
//! - [`value`]: defaults, validation and coercion per value type
//! - [`registry`]: framework fetch and normalization
//! - [`sync`]: add missing framework fields to a tag set
//! - [`render`]: grouped and exploded chip flattening
//! - [`bulk`]: replace/merge one tag set across many files
//! - [`session`]: editable working copy of one file's tags
//!
//! Persistence is behind the [`store`] traits; [`memory`] has in-process
//! implementations.

pub mod bulk;
pub mod config;
pub mod memory;
pub mod normalize;
pub mod registry;
pub mod render;
pub mod session;
pub mod store;
pub mod sync;
pub mod value;

pub use bulk::{BulkApplier, BulkSummary, apply_policy};
pub use config::{EngineConfig, RenderConfig};
pub use memory::{MemoryFrameworkStore, MemoryTagStore};
pub use registry::{RegistryClient, normalize_framework};
pub use render::{Chip, ChipKind, ChipLimit, ChipSummary, RenderMode, RenderOptions, detail, render};
pub use session::{FrameworkTicket, TagSession};
pub use store::{FrameworkStore, TagStore};
pub use sync::{append_synchronized, synchronize, synchronize_at};

// Re-export shared types for convenience
pub use shared::error::{AppError, AppResult, ErrorCode, ErrorKind};
pub use shared::models::{AssetTag, BulkPolicy, FrameworkFilter, TagFramework, TagKey, TagTemplate, TagValue, ValueType};
