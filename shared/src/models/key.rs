//! Tag Key Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Key of a tag or template.
///
/// Older records carry a bare string; newer ones point at a canonical key
/// definition. Both serialize untagged, so a key is either `"Subject"` or
/// `{"id": "k-1", "title": "Subject"}` on the wire. Compare keys through
/// [`TagKey::resolve`] only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagKey {
    Plain(String),
    Canonical {
        #[serde(default)]
        id: String,
        #[serde(default)]
        title: String,
    },
}

impl TagKey {
    pub fn plain(key: impl Into<String>) -> Self {
        Self::Plain(key.into())
    }

    pub fn canonical(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::Canonical {
            id: id.into(),
            title: title.into(),
        }
    }

    /// The string every key comparison uses: the title of a canonical key,
    /// the key itself otherwise.
    pub fn resolve(&self) -> &str {
        match self {
            Self::Plain(key) => key,
            Self::Canonical { title, .. } => title,
        }
    }

    /// Title of a canonical key
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Canonical { title, .. } => Some(title.as_str()),
        }
    }

    /// Id of a canonical key
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Canonical { id, .. } => Some(id.as_str()),
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, Self::Canonical { .. })
    }

    /// A key that resolves to nothing but whitespace
    pub fn is_blank(&self) -> bool {
        self.resolve().trim().is_empty()
    }

    /// Plain form of this key
    pub fn to_plain(&self) -> Self {
        Self::Plain(self.resolve().to_string())
    }
}

impl Default for TagKey {
    fn default() -> Self {
        Self::Plain(String::new())
    }
}

impl From<&str> for TagKey {
    fn from(key: &str) -> Self {
        Self::Plain(key.to_string())
    }
}

impl From<String> for TagKey {
    fn from(key: String) -> Self {
        Self::Plain(key)
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.resolve())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_both_forms() {
        assert_eq!(TagKey::plain("Subject").resolve(), "Subject");
        assert_eq!(TagKey::canonical("k-1", "Subject").resolve(), "Subject");
        assert_eq!(
            TagKey::plain("Subject").resolve(),
            TagKey::canonical("k-9", "Subject").resolve()
        );
    }

    #[test]
    fn test_deserialize_untagged() {
        let key: TagKey = serde_json::from_str("\"License\"").unwrap();
        assert_eq!(key, TagKey::plain("License"));

        let key: TagKey = serde_json::from_str(r#"{"id":"k-2","title":"License"}"#).unwrap();
        assert_eq!(key, TagKey::canonical("k-2", "License"));
        assert_eq!(key.id(), Some("k-2"));
        assert_eq!(key.title(), Some("License"));
    }

    #[test]
    fn test_canonical_without_title_is_blank() {
        let key: TagKey = serde_json::from_str(r#"{"id":"k-3"}"#).unwrap();
        assert!(key.is_canonical());
        assert!(key.is_blank());
        assert!(TagKey::default().is_blank());
        assert!(TagKey::plain("  ").is_blank());
    }

    #[test]
    fn test_canonical_without_id_still_parses() {
        let key: TagKey = serde_json::from_str(r#"{"title":"Grade"}"#).unwrap();
        assert_eq!(key.resolve(), "Grade");
        assert_eq!(key.id(), Some(""));

        let key: TagKey = serde_json::from_str("{}").unwrap();
        assert!(key.is_blank());
    }

    #[test]
    fn test_serialize_keeps_form() {
        let json = serde_json::to_string(&TagKey::canonical("k-1", "Grade")).unwrap();
        assert_eq!(json, r#"{"id":"k-1","title":"Grade"}"#);
        let json = serde_json::to_string(&TagKey::plain("Grade")).unwrap();
        assert_eq!(json, "\"Grade\"");
    }

    #[test]
    fn test_to_plain() {
        let key = TagKey::canonical("k-1", "Grade").to_plain();
        assert_eq!(key, TagKey::plain("Grade"));
        assert_eq!(key.title(), None);
    }
}
