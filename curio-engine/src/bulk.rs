//! Bulk Apply Engine
//!
//! Applies one tag set to many files with a replace or merge policy in a
//! single batched commit.

use crate::store::TagStore;
use crate::value::validate;
use serde::Serialize;
use shared::error::{AppError, AppResult};
use shared::models::{AssetTag, BulkPolicy};
use std::collections::HashSet;

/// What a successful bulk apply touched
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub file_count: usize,
    pub tag_count: usize,
    pub policy: BulkPolicy,
}

/// Result of applying `supplied` to one file's `existing` tags
///
/// `Replace` returns the supplied set. `Merge` overwrites the value of the
/// first existing tag sharing a supplied tag's resolved key and appends the
/// supplied tags that match nothing.
pub fn apply_policy(existing: &[AssetTag], supplied: &[AssetTag], policy: BulkPolicy) -> Vec<AssetTag> {
    match policy {
        BulkPolicy::Replace => supplied.to_vec(),
        BulkPolicy::Merge => {
            let mut merged = existing.to_vec();
            for tag in supplied {
                match merged
                    .iter_mut()
                    .find(|current| current.resolved_key() == tag.resolved_key())
                {
                    Some(current) => current.value = tag.value.clone(),
                    None => merged.push(tag.clone()),
                }
            }
            merged
        }
    }
}

/// Check a supplied tag set before it is sent anywhere
pub fn check_supplied(tags: &[AssetTag]) -> AppResult<()> {
    if tags.is_empty() {
        return Err(AppError::empty_tag_list());
    }
    let mut seen = HashSet::new();
    for tag in tags {
        let key = tag.resolved_key();
        if key.trim().is_empty() {
            return Err(AppError::blank_key(tag.uuid.clone()));
        }
        if !seen.insert(key) {
            return Err(AppError::duplicate_key(key));
        }
        if let Some(template) = tag.template() {
            validate(template, tag.value.as_ref())?;
        }
    }
    Ok(())
}

/// Drives bulk commits against a [`TagStore`]
pub struct BulkApplier<S> {
    store: S,
}

impl<S: TagStore> BulkApplier<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate and commit `tags` to every file in `file_ids`
    ///
    /// Repeated file ids are sent once. Store failures come back unchanged;
    /// files already written by the store are not rolled back.
    pub async fn apply(
        &self,
        file_ids: &[String],
        tags: &[AssetTag],
        policy: BulkPolicy,
    ) -> AppResult<BulkSummary> {
        let mut seen = HashSet::new();
        let targets: Vec<String> = file_ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            .filter(|id| seen.insert(*id))
            .map(str::to_string)
            .collect();
        if targets.is_empty() {
            return Err(AppError::empty_target_list());
        }
        check_supplied(tags)?;

        if let Err(e) = self.store.persist_tags_bulk(&targets, tags, policy).await {
            tracing::error!(
                files = targets.len(),
                policy = policy.as_str(),
                code = e.code.code(),
                error = %e,
                "Bulk tag apply failed"
            );
            return Err(e);
        }

        tracing::info!(
            files = targets.len(),
            tags = tags.len(),
            policy = policy.as_str(),
            "Bulk tags applied"
        );
        Ok(BulkSummary {
            file_count: targets.len(),
            tag_count: tags.len(),
            policy,
        })
    }
}
