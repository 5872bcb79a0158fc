//! Tag Value Model
//!
//! Default derivation, shape validation and best-effort coercion for the
//! six template value types.

use crate::normalize::{is_no_value, sanitize_options};
use chrono::{DateTime, NaiveDate, Utc};
use shared::error::{AppError, AppResult};
use shared::models::{TagTemplate, TagValue, ValueType};

/// Value a new tag gets from its template, using the current time for dates
pub fn default_for(template: &TagTemplate) -> TagValue {
    default_for_at(template, Utc::now())
}

/// Value a new tag gets from its template
///
/// | value type  | default without `default_value` |
/// |-------------|---------------------------------|
/// | text        | `""`                            |
/// | dropdown    | first usable option, or `""`    |
/// | multiselect | `[]`                            |
/// | boolean     | `false`                         |
/// | number      | `0`                             |
/// | date        | `now`                           |
pub fn default_for_at(template: &TagTemplate, now: DateTime<Utc>) -> TagValue {
    if let Some(value) = &template.default_value {
        return value.clone();
    }
    match template.value_type {
        ValueType::Text => TagValue::Text(String::new()),
        ValueType::Dropdown => TagValue::Text(
            sanitize_options(&template.options)
                .into_iter()
                .next()
                .unwrap_or_default(),
        ),
        ValueType::Multiselect => TagValue::List(Vec::new()),
        ValueType::Boolean => TagValue::Bool(false),
        ValueType::Number => TagValue::Number(0.0),
        ValueType::Date => TagValue::Date(now),
    }
}

/// Check that `value` fits `template`
///
/// An empty value is accepted unless the template is `required`.
/// Multi-select values may hold entries outside the option list; dropdown
/// values may not.
pub fn validate(template: &TagTemplate, value: Option<&TagValue>) -> AppResult<()> {
    let key = template.key.resolve();

    let value = match value {
        Some(value) if !is_no_value(Some(value)) => value,
        _ if template.required => return Err(AppError::required_value(key)),
        _ => return Ok(()),
    };

    match (template.value_type, value) {
        // free text renders any scalar
        (ValueType::Text, TagValue::List(_)) => Err(AppError::value_mismatch(
            key,
            "expected text, got a list",
        )),
        (ValueType::Text, _) => Ok(()),
        (ValueType::Dropdown, TagValue::Text(choice)) => {
            let options = sanitize_options(&template.options);
            if options.is_empty() || options.iter().any(|o| o == choice) {
                Ok(())
            } else {
                Err(AppError::value_mismatch(
                    key,
                    format!("'{}' is not one of the options", choice),
                ))
            }
        }
        (ValueType::Multiselect, TagValue::List(_)) => Ok(()),
        (ValueType::Boolean, TagValue::Bool(_)) => Ok(()),
        (ValueType::Number, TagValue::Number(n)) if n.is_finite() => Ok(()),
        (ValueType::Number, TagValue::Number(_)) => {
            Err(AppError::value_mismatch(key, "not a finite number"))
        }
        (ValueType::Date, TagValue::Date(_)) => Ok(()),
        (expected, actual) => Err(AppError::value_mismatch(
            key,
            format!("expected {}, got {}", expected, actual.shape()),
        )),
    }
}

/// Convert a persisted value towards `value_type` where the intent is
/// unambiguous; anything else comes back unchanged.
pub fn coerce(value_type: ValueType, value: TagValue) -> TagValue {
    match (value_type, value) {
        (ValueType::Date, TagValue::Text(text)) => match parse_date(&text) {
            Some(at) => TagValue::Date(at),
            None => TagValue::Text(text),
        },
        (ValueType::Number, TagValue::Text(text)) => match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => TagValue::Number(n),
            _ => TagValue::Text(text),
        },
        (ValueType::Boolean, TagValue::Text(text)) => {
            match text.trim().to_ascii_lowercase().as_str() {
                "true" => TagValue::Bool(true),
                "false" => TagValue::Bool(false),
                _ => TagValue::Text(text),
            }
        }
        (ValueType::Multiselect, TagValue::Text(text)) if text.is_empty() => {
            TagValue::List(Vec::new())
        }
        (ValueType::Multiselect, TagValue::Text(text)) => TagValue::List(vec![text]),
        (ValueType::Dropdown, TagValue::List(mut items)) if items.len() == 1 => {
            TagValue::Text(items.remove(0))
        }
        (_, value) => value,
    }
}

fn parse_date(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
