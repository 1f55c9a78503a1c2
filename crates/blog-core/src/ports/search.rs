use async_trait::async_trait;

use crate::domain::Entity;
use crate::error::SearchError;
use crate::page::PageRequest;

/// Search-index gateway: a query-optimized mirror of the primary store.
///
/// Documents are keyed by the primary-store id; an indexed document is a
/// possibly stale copy of the primary record.
#[async_trait]
pub trait SearchIndex<T: Entity>: Send + Sync {
    /// Upsert the document under the entity's id.
    async fn save(&self, entity: &T) -> Result<(), SearchError>;

    /// Idempotent delete of the document at `id`.
    async fn delete_by_id(&self, id: &str) -> Result<(), SearchError>;

    /// Free-text query (bare terms and `field:value` terms per the
    /// backend's query-string grammar). Relevance order unless the page
    /// carries a sort key; no matches is an empty result, not an error.
    async fn search(&self, query: &str, page: &PageRequest) -> Result<Vec<T>, SearchError>;

    async fn count(&self) -> Result<u64, SearchError>;
}
