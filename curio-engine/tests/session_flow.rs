//! Load, edit, synchronize and commit a file's tags over in-memory stores

use curio_engine::{
    AssetTag, ErrorCode, MemoryFrameworkStore, MemoryTagStore, RegistryClient, RenderConfig,
    RenderOptions, TagFramework, TagKey, TagSession, TagTemplate, TagValue, ValueType, render,
    synchronize,
};
use std::sync::Arc;

fn curriculum() -> TagFramework {
    TagFramework::new("fw-1", "Curriculum")
        .with_template(
            TagTemplate::new("Subject", ValueType::Multiselect)
                .with_options(["Bio", "Chem"])
                .with_hex("#FF0000"),
        )
        .with_template(
            TagTemplate::new("License", ValueType::Dropdown)
                .with_options(["CC-BY", "CC0"])
                .with_hex("#00FF00"),
        )
}

#[test]
fn test_subject_license_example() {
    let existing = vec![AssetTag::new("Subject", vec!["Bio"])];
    let added = synchronize(&existing, &curriculum());
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].resolved_key(), "License");
    assert_eq!(added[0].value, Some(TagValue::from("CC-BY")));

    let mut tags = existing;
    tags.extend(added);
    let summary = render(&tags, &RenderOptions::grouped(), &RenderConfig::default());
    assert_eq!(summary.labels(), vec!["Subject: Bio", "License: CC-BY"]);
    assert_eq!(summary.chips[0].color, "#9E9E9E");
    assert_eq!(summary.chips[1].color, "#00FF00");
}

#[tokio::test]
async fn test_full_session_round_trip() {
    let frameworks = MemoryFrameworkStore::new();
    frameworks.insert(curriculum());
    let registry = RegistryClient::new(frameworks);

    let store = Arc::new(MemoryTagStore::new());
    store.insert("file-1", vec![AssetTag::new(TagKey::canonical("k-9", "Grade"), "7")]);

    let mut session = TagSession::load(store.as_ref(), "file-1").await.unwrap();
    let added = session.sync_framework(&registry, "fw-1").await.unwrap();
    assert_eq!(added, 2);
    // second sync adds nothing
    assert_eq!(session.sync_framework(&registry, "fw-1").await.unwrap(), 0);

    let subject = session.find_by_key("Subject").unwrap().uuid.clone();
    session.add_option(&subject, "Astronomy").unwrap();
    session.commit(store.as_ref()).await.unwrap();
    assert!(!session.is_dirty());

    let persisted = store.tags("file-1");
    assert_eq!(persisted.len(), 3);
    let subject = persisted.iter().find(|t| t.resolved_key() == "Subject").unwrap();
    assert_eq!(subject.value, Some(TagValue::from(vec!["Astronomy"])));
    assert_eq!(subject.framework.as_ref().map(|fw| fw.id.as_str()), Some("fw-1"));
}

#[tokio::test]
async fn test_commit_blocked_by_invalid_value() {
    let store = MemoryTagStore::new();
    let mut session = TagSession::new("file-1", vec![]);
    let ticket = session.begin_framework_request();
    session.apply_framework(ticket, &curriculum());

    let license = session.find_by_key("License").unwrap().uuid.clone();
    session.set_value(&license, TagValue::from("Proprietary")).unwrap();

    let err = session.commit(&store).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::TagValueMismatch);
    assert_eq!(err.tag_key(), Some("License"));
    assert!(store.tags("file-1").is_empty());
    assert!(session.is_dirty());
}

#[tokio::test]
async fn test_unknown_framework_leaves_session_untouched() {
    let registry = RegistryClient::new(MemoryFrameworkStore::new());
    let mut session = TagSession::new("file-1", vec![AssetTag::new("Grade", "7")]);
    let err = session.sync_framework(&registry, "fw-404").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(session.tags().len(), 1);
    assert!(!session.is_dirty());
}

#[test]
fn test_wire_tags_load_with_coercion() {
    let json = r#"[
        {"uuid": "t1", "key": {"id": "k-1", "title": "Published"}, "value": "2024-03-01",
         "framework": {"id": "fw-2", "name": "Dates", "templates": [
            {"key": {"id": "k-1", "title": "Published"}, "valueType": "date"}
         ]}},
        {"uuid": "t2", "key": "Notes", "value": ["a", "b"]},
        {"uuid": "t3", "key": "Grade", "value": null}
    ]"#;
    let tags: Vec<AssetTag> = serde_json::from_str(json).unwrap();
    let session = TagSession::new("file-1", tags);

    assert!(matches!(session.get("t1").unwrap().value, Some(TagValue::Date(_))));
    let summary = render(session.tags(), &RenderOptions::exploded(), &RenderConfig::default());
    assert_eq!(summary.labels(), vec!["2024-03-01", "a", "b"]);
}

#[test]
fn test_malformed_wire_keys_only_drop_their_own_tag() {
    let json = r#"[
        {"uuid": "t1", "key": null, "value": "x"},
        {"uuid": "t2", "key": "Grade", "value": 7},
        {"uuid": "t3", "key": {"title": ""}, "value": "y"}
    ]"#;
    let tags: Vec<AssetTag> = serde_json::from_str(json).unwrap();
    let session = TagSession::new("file-1", tags);

    let summary = render(session.tags(), &RenderOptions::grouped(), &RenderConfig::default());
    assert_eq!(summary.labels(), vec!["Grade: 7"]);
}

#[test]
fn test_timestamp_text_on_plain_tag_is_unchanged() {
    let json = r#"[{"uuid": "t1", "key": "Note", "value": "2024-03-01T09:30:00Z"}]"#;
    let tags: Vec<AssetTag> = serde_json::from_str(json).unwrap();
    let session = TagSession::new("file-1", tags);

    assert_eq!(
        session.get("t1").unwrap().value,
        Some(TagValue::from("2024-03-01T09:30:00Z"))
    );
    let summary = render(session.tags(), &RenderOptions::grouped(), &RenderConfig::default());
    assert_eq!(summary.labels(), vec!["Note: 2024-03-01T09:30:00Z"]);
    let back = serde_json::to_value(session.tags()).unwrap();
    assert_eq!(back[0]["value"], "2024-03-01T09:30:00Z");
}
