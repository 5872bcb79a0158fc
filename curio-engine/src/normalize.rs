//! Normalization helpers shared by every engine component
//!
//! Key resolution itself lives on [`TagKey::resolve`]; what is here builds
//! on it: option sanitizing, key sets, "no value" detection and the textual
//! form of values.

use shared::models::{AssetTag, TagKey, TagValue};
use std::collections::HashSet;

/// Suffix appended to truncated labels
pub const ELLIPSIS: &str = "...";

/// Trim options and drop blanks and repeats, keeping first occurrences
pub fn sanitize_options(options: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    options
        .iter()
        .map(|option| option.trim())
        .filter(|option| !option.is_empty())
        .filter(|option| seen.insert(*option))
        .map(str::to_string)
        .collect()
}

/// Resolved keys of a tag set
pub fn resolved_key_set(tags: &[AssetTag]) -> HashSet<&str> {
    tags.iter().map(|tag| tag.key.resolve()).collect()
}

/// Whether `key` is already used in `tags`
pub fn contains_key(tags: &[AssetTag], key: &TagKey) -> bool {
    tags.iter().any(|tag| tag.key.resolve() == key.resolve())
}

/// `None`, `""` and `[]` all mean "no value"
pub fn is_no_value(value: Option<&TagValue>) -> bool {
    value.is_none_or(TagValue::is_empty)
}

/// A tag that display surfaces skip: blank key or no value
pub fn is_malformed(tag: &AssetTag) -> bool {
    tag.key.is_blank() || is_no_value(tag.value.as_ref())
}

/// Text form of a value: lists joined with ", ", dates as `YYYY-MM-DD`
pub fn format_value(value: &TagValue) -> String {
    match value {
        TagValue::List(items) => items.join(", "),
        _ => value_items(value).join(""),
    }
}

/// Text form of every scalar inside a value, one entry per list element
pub fn value_items(value: &TagValue) -> Vec<String> {
    match value {
        TagValue::Text(text) => vec![text.clone()],
        TagValue::List(items) => items.clone(),
        TagValue::Bool(flag) => vec![flag.to_string()],
        // f64 Display drops the fraction of integral values
        TagValue::Number(number) => vec![number.to_string()],
        TagValue::Date(at) => vec![at.format("%Y-%m-%d").to_string()],
    }
}

/// Cut `label` to `max_chars` characters and append [`ELLIPSIS`] if it was
/// longer
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    match label.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{}", &label[..cut], ELLIPSIS),
        None => label.to_string(),
    }
}
