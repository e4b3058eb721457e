use async_trait::async_trait;
use watch_state_models::{CatalogEntry, MediaKind, SavedItem};

use crate::error::RemoteError;

/// Similar-titles lookups against the metadata catalog. The aggregator is the
/// only consumer; richer catalog operations live on the concrete client.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn similar(&self, id: u64, kind: MediaKind) -> Result<Vec<CatalogEntry>, RemoteError>;
}

/// The authoritative saved-list table, keyed on (user_id, media_id).
#[async_trait]
pub trait RemoteListApi: Send + Sync {
    /// Insert or replace the row matching (item.user_id, item.media_id).
    async fn upsert(&self, item: &SavedItem) -> Result<(), RemoteError>;

    /// Delete the row matching (user_id, media_id). Deleting a row that does
    /// not exist is not an error.
    async fn delete(&self, user_id: &str, media_id: u64) -> Result<(), RemoteError>;

    /// All rows owned by `user_id`, newest first.
    async fn query(&self, user_id: &str) -> Result<Vec<SavedItem>, RemoteError>;
}
