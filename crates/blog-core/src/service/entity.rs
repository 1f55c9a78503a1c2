use std::sync::Arc;

use crate::domain::Entity;
use crate::error::{SearchError, StoreError};
use crate::page::PageRequest;
use crate::ports::{DocumentStore, SearchIndex};

/// Service for one entity type, keeping the primary store and the search
/// index synchronized.
///
/// Every write goes to the primary store first; on success the record is
/// propagated to the search index best-effort. The call succeeds once the
/// primary write succeeds - a failed index write is logged and dropped,
/// leaving the two stores diverged until the next successful write for
/// that id. There is no retry and no reconciliation.
pub struct EntityService<T: Entity> {
    store: Arc<dyn DocumentStore<T>>,
    index: Arc<dyn SearchIndex<T>>,
}

impl<T: Entity> EntityService<T> {
    pub fn new(store: Arc<dyn DocumentStore<T>>, index: Arc<dyn SearchIndex<T>>) -> Self {
        Self { store, index }
    }

    /// Save an entity, then mirror the persisted record into the index.
    pub async fn save(&self, entity: T) -> Result<T, StoreError> {
        tracing::debug!(entity = T::ENTITY_NAME, "request to save");
        let saved = self.store.save(entity).await?;
        self.propagate(&saved).await;
        Ok(saved)
    }

    /// Merge the present fields of `patch` into the stored record, save
    /// and propagate. `None` when no record exists at the patch's id.
    pub async fn partial_update(&self, patch: T) -> Result<Option<T>, StoreError> {
        tracing::debug!(entity = T::ENTITY_NAME, "request to partially update");
        let Some(id) = patch.id().map(str::to_owned) else {
            return Ok(None);
        };
        let Some(mut existing) = self.store.find_by_id(&id).await? else {
            return Ok(None);
        };
        existing.merge(patch);
        let saved = self.store.save(existing).await?;
        self.propagate(&saved).await;
        Ok(Some(saved))
    }

    pub async fn find_all(&self, page: &PageRequest) -> Result<Vec<T>, StoreError> {
        tracing::debug!(entity = T::ENTITY_NAME, "request to get all");
        self.store.find_all(page).await
    }

    pub async fn find_one(&self, id: &str) -> Result<Option<T>, StoreError> {
        tracing::debug!(entity = T::ENTITY_NAME, id, "request to get one");
        self.store.find_by_id(id).await
    }

    /// Delete from the primary store, then best-effort from the index.
    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        tracing::debug!(entity = T::ENTITY_NAME, id, "request to delete");
        self.store.delete_by_id(id).await?;
        if let Err(err) = self.index.delete_by_id(id).await {
            tracing::warn!(
                entity = T::ENTITY_NAME,
                id,
                error = %err,
                "search index delete failed; index retains a deleted record"
            );
        }
        Ok(())
    }

    pub async fn count_all(&self) -> Result<u64, StoreError> {
        self.store.count().await
    }

    /// Count in the search index; may disagree with [`Self::count_all`]
    /// while the stores are diverged.
    pub async fn search_count(&self) -> Result<u64, SearchError> {
        self.index.count().await
    }

    /// Free-text search against the index alone; results are not
    /// cross-checked against the primary store.
    pub async fn search(&self, query: &str, page: &PageRequest) -> Result<Vec<T>, SearchError> {
        tracing::debug!(entity = T::ENTITY_NAME, query, "request to search");
        self.index.search(query, page).await
    }

    // Index propagation never fails the surrounding call.
    async fn propagate(&self, saved: &T) {
        if let Err(err) = self.index.save(saved).await {
            tracing::warn!(
                entity = T::ENTITY_NAME,
                id = saved.id(),
                error = %err,
                "search index write failed; stores may diverge"
            );
        }
    }
}
