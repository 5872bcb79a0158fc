//! Tag Synchronization Engine
//!
//! Works out which tags a framework adds to a file without duplicating the
//! templates the file already covers.

use crate::normalize::resolved_key_set;
use crate::value::default_for_at;
use chrono::{DateTime, Utc};
use shared::models::{AssetTag, TagFramework, TagKey};
use shared::util::new_tag_uuid;

/// Tags to append to `existing` so that every template of `framework` is
/// represented
pub fn synchronize(existing: &[AssetTag], framework: &TagFramework) -> Vec<AssetTag> {
    synchronize_at(existing, framework, Utc::now())
}

/// [`synchronize`] with an explicit clock for date defaults
///
/// Membership is tested on resolved keys, so re-running after appending
/// the result yields nothing. Templates with a blank key are skipped, and a
/// key repeated inside the framework only produces one tag.
pub fn synchronize_at(
    existing: &[AssetTag],
    framework: &TagFramework,
    now: DateTime<Utc>,
) -> Vec<AssetTag> {
    let mut present = resolved_key_set(existing);
    let mut added = Vec::new();

    for template in &framework.templates {
        let key = template.key.resolve();
        if key.trim().is_empty() {
            tracing::debug!(framework_id = %framework.id, "Skipping template with blank key");
            continue;
        }
        if !present.insert(key) {
            continue;
        }
        added.push(AssetTag {
            uuid: new_tag_uuid(),
            key: TagKey::plain(key),
            value: Some(default_for_at(template, now)),
            framework: Some(framework.clone()),
        });
    }

    tracing::debug!(
        framework_id = %framework.id,
        existing = existing.len(),
        added = added.len(),
        "Synchronized framework tags"
    );
    added
}

/// Synchronize and append in one step, returning how many tags were added
pub fn append_synchronized(tags: &mut Vec<AssetTag>, framework: &TagFramework) -> usize {
    let added = synchronize(tags, framework);
    let count = added.len();
    tags.extend(added);
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared::models::{TagTemplate, TagValue, ValueType};

    fn subject_license() -> TagFramework {
        TagFramework::new("F", "Course metadata")
            .with_template(
                TagTemplate::new("Subject", ValueType::Dropdown).with_options(["Bio", "Chem"]),
            )
            .with_template(TagTemplate::new("License", ValueType::Text))
    }

    #[test]
    fn test_concrete_subject_license_example() {
        let existing = vec![AssetTag::new("Subject", "Bio")];
        let added = synchronize(&existing, &subject_license());

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].key, TagKey::plain("License"));
        assert_eq!(added[0].value, Some(TagValue::from("")));
        assert_eq!(added[0].framework.as_ref().map(|f| f.id.as_str()), Some("F"));
        assert!(!added[0].uuid.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let framework = subject_license()
            .with_template(TagTemplate::new("Published", ValueType::Date))
            .with_template(TagTemplate::new("Topics", ValueType::Multiselect));
        let seeds: Vec<Vec<AssetTag>> = vec![
            vec![],
            vec![AssetTag::new("Subject", "Chem")],
            vec![AssetTag::new(TagKey::canonical("k-1", "License"), "CC0")],
            vec![AssetTag::new("Unrelated", "x"), AssetTag::new("Topics", vec!["a"])],
        ];
        for existing in seeds {
            let mut combined = existing.clone();
            combined.extend(synchronize(&existing, &framework));
            assert!(synchronize(&combined, &framework).is_empty());
        }
    }

    #[test]
    fn test_no_duplicate_keys_after_sync() {
        let framework = subject_license()
            .with_template(TagTemplate::new("Subject", ValueType::Text))
            .with_template(TagTemplate::new(TagKey::canonical("k-2", "License"), ValueType::Text));
        let existing = vec![AssetTag::new("Grade", 3i64)];

        let mut combined = existing.clone();
        combined.extend(synchronize(&existing, &framework));

        let keys: Vec<&str> = combined.iter().map(|t| t.resolved_key()).collect();
        assert_eq!(keys, vec!["Grade", "Subject", "License"]);
        assert_eq!(resolved_key_set(&combined).len(), combined.len());
    }

    #[test]
    fn test_canonical_existing_key_counts_as_present() {
        let existing = vec![AssetTag::new(TagKey::canonical("k-9", "License"), "CC-BY")];
        let added = synchronize(&existing, &subject_license());
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].resolved_key(), "Subject");
        assert_eq!(added[0].value, Some(TagValue::from("Bio")));
    }

    #[test]
    fn test_colliding_existing_keys() {
        let existing = vec![
            AssetTag::new("Subject", "Bio"),
            AssetTag::new("Subject", "Chem"),
        ];
        let added = synchronize(&existing, &subject_license());
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].resolved_key(), "License");
    }

    #[test]
    fn test_template_order_and_defaults() {
        let now = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();
        let framework = TagFramework::new("F2", "Mixed")
            .with_template(TagTemplate::new("Published", ValueType::Date))
            .with_template(TagTemplate::new("Reviewed", ValueType::Boolean).with_default(true))
            .with_template(TagTemplate::new("", ValueType::Text));

        let added = synchronize_at(&[], &framework, now);
        assert_eq!(added.len(), 2);
        assert_eq!(added[0].value, Some(TagValue::Date(now)));
        assert_eq!(added[1].value, Some(TagValue::Bool(true)));
    }

    #[test]
    fn test_empty_framework() {
        let framework = TagFramework::new("F3", "Empty");
        assert!(synchronize(&[AssetTag::new("a", "b")], &framework).is_empty());
    }

    #[test]
    fn test_append_synchronized() {
        let mut tags = vec![AssetTag::new("Subject", "Bio")];
        assert_eq!(append_synchronized(&mut tags, &subject_license()), 1);
        assert_eq!(append_synchronized(&mut tags, &subject_license()), 0);
        assert_eq!(tags.len(), 2);
    }
}
