//! Collaborator contracts
//!
//! Framework and tag persistence live outside the engine. These traits are
//! the whole surface the engine needs from them; errors come back as
//! [`AppError`](shared::error::AppError) and are passed on unchanged.

use async_trait::async_trait;
use shared::error::AppResult;
use shared::models::{AssetTag, BulkPolicy, FrameworkFilter, TagFramework};
use std::sync::Arc;

/// Framework/template retrieval
#[async_trait]
pub trait FrameworkStore: Send + Sync {
    /// `FrameworkNotFound` when the id is unknown, `RemoteError` on
    /// transport failure
    async fn fetch_framework(&self, id: &str) -> AppResult<TagFramework>;

    async fn fetch_framework_list(&self, filter: &FrameworkFilter) -> AppResult<Vec<TagFramework>>;
}

/// Tag set retrieval and commits
#[async_trait]
pub trait TagStore: Send + Sync {
    async fn fetch_tags(&self, file_id: &str) -> AppResult<Vec<AssetTag>>;

    /// Replace the whole tag set of one file
    async fn persist_tags(&self, file_id: &str, tags: &[AssetTag]) -> AppResult<()>;

    /// One batched commit; atomic per file, not across files
    async fn persist_tags_bulk(
        &self,
        file_ids: &[String],
        tags: &[AssetTag],
        policy: BulkPolicy,
    ) -> AppResult<()>;
}

#[async_trait]
impl<T: FrameworkStore + ?Sized> FrameworkStore for Arc<T> {
    async fn fetch_framework(&self, id: &str) -> AppResult<TagFramework> {
        (**self).fetch_framework(id).await
    }

    async fn fetch_framework_list(&self, filter: &FrameworkFilter) -> AppResult<Vec<TagFramework>> {
        (**self).fetch_framework_list(filter).await
    }
}

#[async_trait]
impl<T: TagStore + ?Sized> TagStore for Arc<T> {
    async fn fetch_tags(&self, file_id: &str) -> AppResult<Vec<AssetTag>> {
        (**self).fetch_tags(file_id).await
    }

    async fn persist_tags(&self, file_id: &str, tags: &[AssetTag]) -> AppResult<()> {
        (**self).persist_tags(file_id, tags).await
    }

    async fn persist_tags_bulk(
        &self,
        file_ids: &[String],
        tags: &[AssetTag],
        policy: BulkPolicy,
    ) -> AppResult<()> {
        (**self).persist_tags_bulk(file_ids, tags, policy).await
    }
}
