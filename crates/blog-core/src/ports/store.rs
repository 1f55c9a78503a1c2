use async_trait::async_trait;

use crate::domain::{Entity, Post, PostWithTags};
use crate::error::StoreError;
use crate::page::PageRequest;

/// Primary-store gateway: CRUD access to one document collection.
///
/// The store is the source of truth; it assigns an id on first insert
/// when none is supplied.
#[async_trait]
pub trait DocumentStore<T: Entity>: Send + Sync {
    /// Insert if the entity has no id (the store assigns one), otherwise
    /// replace the record at that id.
    async fn save(&self, entity: T) -> Result<T, StoreError>;

    /// Point lookup; an absent id is not an error.
    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// Paginated list; insertion order unless a sort key is set.
    async fn find_all(&self, page: &PageRequest) -> Result<Vec<T>, StoreError>;

    /// Idempotent delete; removing an absent id succeeds.
    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError>;

    async fn count(&self) -> Result<u64, StoreError>;
}

/// Post store with eager association resolution.
///
/// The eager variants resolve tag references in one batched lookup so a
/// page of posts never costs one tag query per post.
#[async_trait]
pub trait PostStore: DocumentStore<Post> {
    async fn find_all_with_tags(&self, page: &PageRequest)
    -> Result<Vec<PostWithTags>, StoreError>;

    async fn find_one_with_tags(&self, id: &str) -> Result<Option<PostWithTags>, StoreError>;
}
