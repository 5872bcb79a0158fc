//! Curio Client - HTTP collaborator for the tagging engine
//!
//! Talks to the tag and framework service over its JSON API and implements
//! [`curio_engine::FrameworkStore`] and [`curio_engine::TagStore`].

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod logger;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use logger::init_logger;

// Re-export shared types for convenience
pub use shared::error::ApiResponse;
