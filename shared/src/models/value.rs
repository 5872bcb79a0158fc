//! Tag Value Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Value type of a template field
///
/// Unknown type strings and `null` fail closed to [`ValueType::Text`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "Option<String>")]
pub enum ValueType {
    #[default]
    Text,
    Dropdown,
    Multiselect,
    Boolean,
    Number,
    Date,
}

impl ValueType {
    pub const ALL: [ValueType; 6] = [
        ValueType::Text,
        ValueType::Dropdown,
        ValueType::Multiselect,
        ValueType::Boolean,
        ValueType::Number,
        ValueType::Date,
    ];

    /// Parse a type name, case-insensitively
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dropdown" | "select" => Self::Dropdown,
            "multiselect" | "multi_select" | "multi-select" => Self::Multiselect,
            "boolean" | "bool" => Self::Boolean,
            "number" | "numeric" => Self::Number,
            "date" => Self::Date,
            _ => Self::Text,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Dropdown => "dropdown",
            Self::Multiselect => "multiselect",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::Date => "date",
        }
    }

    /// Types whose values are picked from `options`
    pub fn has_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Multiselect)
    }
}

impl From<String> for ValueType {
    fn from(name: String) -> Self {
        Self::parse(&name)
    }
}

impl From<Option<String>> for ValueType {
    fn from(name: Option<String>) -> Self {
        name.as_deref().map_or(Self::Text, Self::parse)
    }
}

impl From<&str> for ValueType {
    fn from(name: &str) -> Self {
        Self::parse(name)
    }
}

impl Serialize for ValueType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value carried by a tag
///
/// Serialized untagged, so the wire form is the bare JSON value. Dates
/// travel as RFC 3339 strings. Every JSON string deserializes as
/// [`TagValue::Text`]; only a date template turns it back into a date
/// (see `curio_engine::value::coerce`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TagValue {
    Bool(bool),
    Number(f64),
    List(Vec<String>),
    Date(DateTime<Utc>),
    Text(String),
}

/// Wire shapes a value can arrive in
#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Bool(bool),
    Number(f64),
    List(Vec<String>),
    Text(String),
}

impl<'de> Deserialize<'de> for TagValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match WireValue::deserialize(deserializer)? {
            WireValue::Bool(flag) => Self::Bool(flag),
            WireValue::Number(number) => Self::Number(number),
            WireValue::List(items) => Self::List(items),
            WireValue::Text(text) => Self::Text(text),
        })
    }
}

impl TagValue {
    /// `""` and `[]` count as no value
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }

    /// Name of the value shape, for error messages
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Date(_) => "date",
            Self::Text(_) => "text",
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<&str> for TagValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TagValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for TagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for TagValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for TagValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<Vec<String>> for TagValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<&str>> for TagValue {
    fn from(items: Vec<&str>) -> Self {
        Self::List(items.into_iter().map(str::to_string).collect())
    }
}

impl From<DateTime<Utc>> for TagValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::Date(value)
    }
}
