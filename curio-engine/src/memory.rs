//! In-memory collaborators
//!
//! Reference implementations of [`FrameworkStore`] and [`TagStore`] backed
//! by `DashMap`. Useful for tests, demos and single-process deployments.

use crate::bulk::apply_policy;
use crate::store::{FrameworkStore, TagStore};
use async_trait::async_trait;
use dashmap::DashMap;
use shared::error::{AppError, AppResult};
use shared::models::{AssetTag, BulkPolicy, FrameworkFilter, TagFramework};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Frameworks keyed by id
#[derive(Debug, Default)]
pub struct MemoryFrameworkStore {
    frameworks: DashMap<String, TagFramework>,
}

impl MemoryFrameworkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a framework
    pub fn insert(&self, framework: TagFramework) {
        self.frameworks.insert(framework.id.clone(), framework);
    }

    pub fn remove(&self, id: &str) -> Option<TagFramework> {
        self.frameworks.remove(id).map(|(_, fw)| fw)
    }

    pub fn len(&self) -> usize {
        self.frameworks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frameworks.is_empty()
    }
}

impl FromIterator<TagFramework> for MemoryFrameworkStore {
    fn from_iter<I: IntoIterator<Item = TagFramework>>(iter: I) -> Self {
        let store = Self::new();
        for framework in iter {
            store.insert(framework);
        }
        store
    }
}

fn matches_filter(framework: &TagFramework, filter: &FrameworkFilter) -> bool {
    let org_ok = filter
        .organization_id
        .as_deref()
        .is_none_or(|org| framework.organization_id.as_deref() == Some(org));
    let name_ok = filter.name.as_deref().is_none_or(|name| {
        framework
            .name
            .to_lowercase()
            .contains(&name.to_lowercase())
    });
    org_ok && name_ok
}

#[async_trait]
impl FrameworkStore for MemoryFrameworkStore {
    async fn fetch_framework(&self, id: &str) -> AppResult<TagFramework> {
        self.frameworks
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| AppError::framework_not_found(id))
    }

    async fn fetch_framework_list(&self, filter: &FrameworkFilter) -> AppResult<Vec<TagFramework>> {
        let mut frameworks: Vec<TagFramework> = self
            .frameworks
            .iter()
            .filter(|entry| matches_filter(entry.value(), filter))
            .map(|entry| entry.value().clone())
            .collect();
        frameworks.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(frameworks)
    }
}

/// Tag sets keyed by file id
#[derive(Debug, Default)]
pub struct MemoryTagStore {
    files: DashMap<String, Vec<AssetTag>>,
    bulk_requests: AtomicUsize,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the tag set of a file
    pub fn insert(&self, file_id: impl Into<String>, tags: Vec<AssetTag>) {
        self.files.insert(file_id.into(), tags);
    }

    /// Current tag set of a file, empty when unknown
    pub fn tags(&self, file_id: &str) -> Vec<AssetTag> {
        self.files
            .get(file_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Number of batched commits received
    pub fn bulk_request_count(&self) -> usize {
        self.bulk_requests.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TagStore for MemoryTagStore {
    async fn fetch_tags(&self, file_id: &str) -> AppResult<Vec<AssetTag>> {
        Ok(self.tags(file_id))
    }

    async fn persist_tags(&self, file_id: &str, tags: &[AssetTag]) -> AppResult<()> {
        self.files.insert(file_id.to_string(), tags.to_vec());
        Ok(())
    }

    async fn persist_tags_bulk(
        &self,
        file_ids: &[String],
        tags: &[AssetTag],
        policy: BulkPolicy,
    ) -> AppResult<()> {
        self.bulk_requests.fetch_add(1, Ordering::SeqCst);
        for file_id in file_ids {
            // entry guard holds the shard lock, so each file updates atomically
            let mut entry = self.files.entry(file_id.clone()).or_default();
            let updated = apply_policy(entry.value(), tags, policy);
            *entry.value_mut() = updated;
        }
        Ok(())
    }
}
