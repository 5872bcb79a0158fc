//! Local JSON input for the CLI

use anyhow::Context;
use serde::de::DeserializeOwned;
use shared::models::{AssetTag, TagFramework};
use std::path::Path;

/// Read and parse a JSON file
pub fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Failed to parse {}", path.display()))
}

/// A tag set file: a bare array of tags
pub fn load_tags(path: &Path) -> anyhow::Result<Vec<AssetTag>> {
    load_json(path)
}

pub fn load_framework(path: &Path) -> anyhow::Result<TagFramework> {
    load_json(path)
}
