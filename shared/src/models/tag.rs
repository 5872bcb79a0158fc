//! Asset Tag Model

use super::framework::{TagFramework, TagTemplate};
use super::key::TagKey;
use super::null_as_default;
use super::value::TagValue;
use serde::{Deserialize, Serialize};

/// One tag instance attached to a file
///
/// Wire shape is `{uuid, key, value, framework?}`. A tag created from a
/// framework embeds that framework by value, so later edits can recover the
/// field constraints without another lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetTag {
    /// Client-generated for new tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    /// A missing, null or id-less key comes in blank rather than failing the
    /// whole tag list
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: TagKey,
    #[serde(default)]
    pub value: Option<TagValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub framework: Option<TagFramework>,
}

impl AssetTag {
    /// Free-form tag with a fresh uuid
    pub fn new(key: impl Into<TagKey>, value: impl Into<TagValue>) -> Self {
        Self {
            uuid: crate::util::new_tag_uuid(),
            key: key.into(),
            value: Some(value.into()),
            framework: None,
        }
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.uuid = uuid.into();
        self
    }

    pub fn with_framework(mut self, framework: TagFramework) -> Self {
        self.framework = Some(framework);
        self
    }

    pub fn resolved_key(&self) -> &str {
        self.key.resolve()
    }

    pub fn is_framework_derived(&self) -> bool {
        self.framework.is_some()
    }

    /// Template this tag was created from
    pub fn template(&self) -> Option<&TagTemplate> {
        self.framework
            .as_ref()
            .and_then(|fw| fw.template(self.key.resolve()))
    }

    /// Whether the tag carries a displayable value
    pub fn has_value(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.is_empty())
    }
}

/// Conflict policy for bulk apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkPolicy {
    /// Discard every target's tags and use the supplied set
    Replace,
    /// Add the supplied tags; same key overwrites the existing value
    #[serde(alias = "append")]
    Merge,
}

impl BulkPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Replace => "replace",
            Self::Merge => "merge",
        }
    }
}

/// Body of a batched tag commit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkTagRequest {
    pub file_ids: Vec<String>,
    pub tags: Vec<AssetTag>,
    pub policy: BulkPolicy,
}
