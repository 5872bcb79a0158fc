//! Framework/Template Registry Client
//!
//! Fetches framework definitions from a [`FrameworkStore`] and normalizes
//! them before anything else in the engine sees them.

use crate::normalize::sanitize_options;
use crate::store::FrameworkStore;
use crate::value::coerce;
use shared::error::{AppError, AppResult};
use shared::models::{FrameworkFilter, TagFramework};
use std::collections::HashSet;

/// Sanitize template options, coerce wire defaults towards the template's
/// value type, and drop templates whose resolved key is blank or repeats an
/// earlier template
pub fn normalize_framework(mut framework: TagFramework) -> TagFramework {
    let mut seen = HashSet::new();
    let templates = std::mem::take(&mut framework.templates);
    framework.templates = templates
        .into_iter()
        .filter(|template| {
            let key = template.key.resolve().to_string();
            if key.trim().is_empty() {
                tracing::warn!(framework_id = %framework.id, "Dropping template with blank key");
                return false;
            }
            if !seen.insert(key) {
                tracing::warn!(
                    framework_id = %framework.id,
                    key = %template.key,
                    "Dropping template with repeated key"
                );
                return false;
            }
            true
        })
        .map(|mut template| {
            template.options = sanitize_options(&template.options);
            let value_type = template.value_type;
            template.default_value = template
                .default_value
                .take()
                .map(|value| coerce(value_type, value));
            template
        })
        .collect();
    framework
}

/// Registry access over any framework store
pub struct RegistryClient<S> {
    store: S,
}

impl<S: FrameworkStore> RegistryClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch one framework with normalized templates
    pub async fn fetch_framework(&self, id: &str) -> AppResult<TagFramework> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::validation("Framework id must not be blank"));
        }
        match self.store.fetch_framework(id).await {
            Ok(framework) => Ok(normalize_framework(framework)),
            Err(e) => {
                tracing::error!(framework_id = %id, code = e.code.code(), error = %e, "Framework fetch failed");
                Err(e)
            }
        }
    }

    /// Fetch every framework matching `filter`
    pub async fn fetch_framework_list(&self, filter: &FrameworkFilter) -> AppResult<Vec<TagFramework>> {
        match self.store.fetch_framework_list(filter).await {
            Ok(frameworks) => Ok(frameworks.into_iter().map(normalize_framework).collect()),
            Err(e) => {
                tracing::error!(code = e.code.code(), error = %e, "Framework list fetch failed");
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryFrameworkStore;
    use shared::error::ErrorCode;
    use shared::models::{TagKey, TagTemplate, TagValue, ValueType};

    fn messy_framework() -> TagFramework {
        TagFramework::new("fw-1", "Curriculum")
            .with_template(
                TagTemplate::new(TagKey::canonical("k-1", "Subject"), ValueType::Multiselect)
                    .with_options(["Bio", " ", "Bio", "Chem "]),
            )
            .with_template(TagTemplate::new("", ValueType::Text))
            .with_template(TagTemplate::new("Subject", ValueType::Text))
            .with_template(TagTemplate::new("License", ValueType::Dropdown))
    }

    #[test]
    fn test_normalize_framework() {
        let fw = normalize_framework(messy_framework());
        let keys: Vec<&str> = fw.templates.iter().map(|t| t.key.resolve()).collect();
        assert_eq!(keys, vec!["Subject", "License"]);
        assert!(fw.templates[0].key.is_canonical());
        assert_eq!(fw.templates[0].options, vec!["Bio", "Chem"]);
        assert_eq!(fw.templates[0].value_type, ValueType::Multiselect);
    }

    #[test]
    fn test_normalize_coerces_wire_defaults() {
        let fw: TagFramework = serde_json::from_value(serde_json::json!({
            "id": "fw-2",
            "name": "Archive",
            "templates": [
                {"key": "Published", "valueType": "date", "defaultValue": "2024-03-01"},
                {"key": "Note", "valueType": "text", "defaultValue": "2024-03-01"}
            ]
        }))
        .unwrap();
        let fw = normalize_framework(fw);
        assert!(matches!(fw.templates[0].default_value, Some(TagValue::Date(_))));
        assert_eq!(fw.templates[1].default_value, Some(TagValue::from("2024-03-01")));
    }

    #[tokio::test]
    async fn test_fetch_normalizes() {
        let store = MemoryFrameworkStore::new();
        store.insert(messy_framework());
        let registry = RegistryClient::new(store);
        let fw = registry.fetch_framework("fw-1").await.unwrap();
        assert_eq!(fw.templates.len(), 2);

        let list = registry
            .fetch_framework_list(&FrameworkFilter::default())
            .await
            .unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].templates.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_errors() {
        let registry = RegistryClient::new(MemoryFrameworkStore::new());
        let err = registry.fetch_framework("  ").await.unwrap_err();
        assert!(err.is_validation());

        let err = registry.fetch_framework("missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::FrameworkNotFound);
        assert!(err.is_not_found());
    }
}
