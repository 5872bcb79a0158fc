//! Editing session
//!
//! In-memory working copy of one file's tags. Edits stay local until
//! [`TagSession::commit`]; framework results are accepted only for the most
//! recent request.

use crate::normalize::contains_key;
use crate::registry::RegistryClient;
use crate::store::{FrameworkStore, TagStore};
use crate::sync::append_synchronized;
use crate::value::{coerce, validate};
use shared::error::{AppError, AppResult};
use shared::models::{AssetTag, TagFramework, TagKey, TagValue, ValueType};
use std::collections::HashSet;

/// Identifies one framework request issued by a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameworkTicket(u64);

#[derive(Debug, Clone)]
pub struct TagSession {
    file_id: String,
    tags: Vec<AssetTag>,
    dirty: bool,
    issued: u64,
}

fn coerce_to_template(tag: &mut AssetTag) {
    let Some(value_type) = tag.template().map(|template| template.value_type) else {
        return;
    };
    if let Some(value) = tag.value.take() {
        tag.value = Some(coerce(value_type, value));
    }
}

impl TagSession {
    pub fn new(file_id: impl Into<String>, mut tags: Vec<AssetTag>) -> Self {
        tags.iter_mut().for_each(coerce_to_template);
        Self {
            file_id: file_id.into(),
            tags,
            dirty: false,
            issued: 0,
        }
    }

    /// Start a session from the persisted tags of `file_id`
    pub async fn load<S: TagStore + ?Sized>(store: &S, file_id: &str) -> AppResult<Self> {
        let tags = store.fetch_tags(file_id).await?;
        tracing::debug!(file_id = %file_id, tags = tags.len(), "Loaded tag session");
        Ok(Self::new(file_id, tags))
    }

    pub fn file_id(&self) -> &str {
        &self.file_id
    }

    pub fn tags(&self) -> &[AssetTag] {
        &self.tags
    }

    pub fn into_tags(self) -> Vec<AssetTag> {
        self.tags
    }

    /// Whether there are edits not yet committed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn get(&self, uuid: &str) -> Option<&AssetTag> {
        self.tags.iter().find(|tag| tag.uuid == uuid)
    }

    pub fn find_by_key(&self, key: &str) -> Option<&AssetTag> {
        self.tags.iter().find(|tag| tag.resolved_key() == key)
    }

    fn get_mut(&mut self, uuid: &str) -> AppResult<&mut AssetTag> {
        self.tags
            .iter_mut()
            .find(|tag| tag.uuid == uuid)
            .ok_or_else(|| AppError::tag_not_found(uuid))
    }

    // ==================== Edits ====================

    pub fn add_tag(&mut self, mut tag: AssetTag) -> AppResult<()> {
        if tag.key.is_blank() {
            return Err(AppError::blank_key(tag.uuid));
        }
        if contains_key(&self.tags, &tag.key) {
            return Err(AppError::duplicate_key(tag.resolved_key()));
        }
        coerce_to_template(&mut tag);
        self.tags.push(tag);
        self.dirty = true;
        Ok(())
    }

    /// Replace a tag's value, coercing it towards the tag's template
    pub fn set_value(&mut self, uuid: &str, value: TagValue) -> AppResult<()> {
        let tag = self.get_mut(uuid)?;
        tag.value = Some(value);
        coerce_to_template(tag);
        self.dirty = true;
        Ok(())
    }

    /// Rename an ad-hoc tag; framework-derived tags keep their key
    pub fn rename_key(&mut self, uuid: &str, key: impl Into<TagKey>) -> AppResult<()> {
        let key = key.into();
        if key.is_blank() {
            return Err(AppError::blank_key(uuid));
        }
        let taken = self
            .tags
            .iter()
            .any(|tag| tag.uuid != uuid && tag.resolved_key() == key.resolve());
        let tag = self.get_mut(uuid)?;
        if tag.is_framework_derived() {
            return Err(AppError::framework_tag_locked(tag.resolved_key()));
        }
        if taken {
            return Err(AppError::duplicate_key(key.resolve()));
        }
        tag.key = key;
        self.dirty = true;
        Ok(())
    }

    pub fn remove_tag(&mut self, uuid: &str) -> AppResult<AssetTag> {
        let index = self
            .tags
            .iter()
            .position(|tag| tag.uuid == uuid)
            .ok_or_else(|| AppError::tag_not_found(uuid))?;
        self.dirty = true;
        Ok(self.tags.remove(index))
    }

    /// Add an ad-hoc choice to a multi-select tag's own value
    ///
    /// The template's option list is left alone. Returns `false` when the
    /// option was already selected.
    pub fn add_option(&mut self, uuid: &str, option: &str) -> AppResult<bool> {
        let option = option.trim();
        let tag = self.get_mut(uuid)?;
        let key = tag.resolved_key().to_string();
        if option.is_empty() {
            return Err(AppError::value_mismatch(key, "option must not be blank"));
        }
        let multiselect = tag
            .template()
            .is_none_or(|template| template.value_type == ValueType::Multiselect);
        if multiselect && !tag.has_value() {
            tag.value = Some(TagValue::List(Vec::new()));
        }

        let items = match tag.value.as_mut() {
            Some(TagValue::List(items)) => items,
            Some(other) => {
                return Err(AppError::value_mismatch(
                    key,
                    format!("expected a list, got {}", other.shape()),
                ));
            }
            None => return Err(AppError::value_mismatch(key, "expected a list, got nothing")),
        };

        if items.iter().any(|item| item == option) {
            return Ok(false);
        }
        items.push(option.to_string());
        self.dirty = true;
        Ok(true)
    }

    // ==================== Frameworks ====================

    /// Issue a ticket for a framework fetch about to start
    ///
    /// Only the latest ticket's result is applied.
    pub fn begin_framework_request(&mut self) -> FrameworkTicket {
        self.issued += 1;
        FrameworkTicket(self.issued)
    }

    /// Synchronize `framework` into the session if `ticket` is still current
    ///
    /// Returns the number of tags added, or `None` when the result is stale.
    pub fn apply_framework(&mut self, ticket: FrameworkTicket, framework: &TagFramework) -> Option<usize> {
        if ticket.0 != self.issued {
            tracing::warn!(
                file_id = %self.file_id,
                framework_id = %framework.id,
                ticket = ticket.0,
                latest = self.issued,
                "Discarding stale framework result"
            );
            return None;
        }
        let added = append_synchronized(&mut self.tags, framework);
        if added > 0 {
            self.dirty = true;
        }
        Some(added)
    }

    /// Fetch a framework through `registry` and synchronize it
    pub async fn sync_framework<F: FrameworkStore>(
        &mut self,
        registry: &RegistryClient<F>,
        framework_id: &str,
    ) -> AppResult<usize> {
        let ticket = self.begin_framework_request();
        let framework = registry.fetch_framework(framework_id).await?;
        Ok(self.apply_framework(ticket, &framework).unwrap_or(0))
    }

    // ==================== Commit ====================

    /// Check every tag, stopping at the first offending one
    pub fn validate(&self) -> AppResult<()> {
        let mut seen = HashSet::new();
        for tag in &self.tags {
            if tag.key.is_blank() {
                return Err(AppError::blank_key(tag.uuid.clone()));
            }
            if !seen.insert(tag.resolved_key()) {
                return Err(AppError::duplicate_key(tag.resolved_key()));
            }
            if let Some(template) = tag.template() {
                validate(template, tag.value.as_ref())?;
            }
        }
        Ok(())
    }

    /// Validate, then replace the persisted tag set
    pub async fn commit<S: TagStore + ?Sized>(&mut self, store: &S) -> AppResult<()> {
        self.validate()?;
        if let Err(e) = store.persist_tags(&self.file_id, &self.tags).await {
            tracing::error!(file_id = %self.file_id, code = e.code.code(), error = %e, "Tag commit failed");
            return Err(e);
        }
        tracing::info!(file_id = %self.file_id, tags = self.tags.len(), "Tags committed");
        self.dirty = false;
        Ok(())
    }
}
