//! Data models
//!
//! Shared between curio-engine, curio-client and the persistence service
//! (via API). Field names serialize snake_case; schema fields also accept
//! the camelCase spelling older payloads use.

pub mod framework;
pub mod key;
pub mod tag;
pub mod value;

// Re-exports
pub use framework::*;
pub use key::*;
pub use tag::*;
pub use value::*;

use serde::{Deserialize, Deserializer};

/// Deserialize `null` the same way as a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
