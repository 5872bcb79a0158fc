//! Tag Framework Model

use super::key::TagKey;
use super::null_as_default;
use super::value::{TagValue, ValueType};
use serde::{Deserialize, Serialize};

/// One field definition within a framework
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagTemplate {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: TagKey,
    #[serde(default, alias = "valueType")]
    pub value_type: ValueType,
    /// Choices for dropdown/multiselect. May contain blanks and repeats as
    /// stored; sanitize before use.
    #[serde(default, deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    #[serde(default, alias = "defaultValue", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<TagValue>,
    /// Chip color for tags created from this template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl TagTemplate {
    pub fn new(key: impl Into<TagKey>, value_type: ValueType) -> Self {
        Self {
            key: key.into(),
            value_type,
            ..Default::default()
        }
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: impl Into<TagValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_hex(mut self, hex: impl Into<String>) -> Self {
        self.hex = Some(hex.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A named, organization-owned tag schema
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagFramework {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub templates: Vec<TagTemplate>,
}

impl TagFramework {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_template(mut self, template: TagTemplate) -> Self {
        self.templates.push(template);
        self
    }

    /// First template whose resolved key equals `key`
    pub fn template(&self, key: &str) -> Option<&TagTemplate> {
        self.templates.iter().find(|t| t.key.resolve() == key)
    }
}

/// Discovery filter for framework selection lists.
///
/// Interpreted by the persistence service; the engine passes it through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
