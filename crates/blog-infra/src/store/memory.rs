//! In-memory document store - used as fallback when MongoDB is unavailable.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Entity, Post, PostWithTags, Tag};
use blog_core::error::StoreError;
use blog_core::page::PageRequest;
use blog_core::ports::{DocumentStore, PostStore};

use crate::paging::sort_and_page;

struct Inner<T> {
    by_id: HashMap<String, T>,
    order: Vec<String>,
}

/// In-memory store keeping records in a map plus an insertion-order list.
///
/// This is the fallback implementation when MongoDB is not configured.
/// Note: Data is lost on process restart.
pub struct InMemoryStore<T: Entity> {
    records: RwLock<Inner<T>>,
}

impl<T: Entity> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Inner {
                by_id: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for InMemoryStore<T> {
    async fn save(&self, mut entity: T) -> Result<T, StoreError> {
        let mut inner = self.records.write().await;
        let id = match entity.id().map(str::to_owned) {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().simple().to_string();
                entity.set_id(id.clone());
                id
            }
        };
        if inner.by_id.insert(id.clone(), entity.clone()).is_none() {
            inner.order.push(id);
        }
        Ok(entity)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records.read().await.by_id.get(id).cloned())
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Vec<T>, StoreError> {
        let inner = self.records.read().await;
        let items: Vec<T> = inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect();
        Ok(sort_and_page(items, page))
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        let mut inner = self.records.write().await;
        if inner.by_id.remove(id).is_some() {
            inner.order.retain(|k| k != id);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.records.read().await.by_id.len() as u64)
    }
}

/// In-memory post store sharing the tag store for eager resolution.
pub struct InMemoryPostStore {
    posts: InMemoryStore<Post>,
    tags: Arc<InMemoryStore<Tag>>,
}

impl InMemoryPostStore {
    pub fn new(tags: Arc<InMemoryStore<Tag>>) -> Self {
        Self {
            posts: InMemoryStore::new(),
            tags,
        }
    }

    async fn resolve(&self, post: Post) -> PostWithTags {
        let tags = self.tags.records.read().await;
        let resolved = post
            .tag_ids
            .iter()
            .filter_map(|id| tags.by_id.get(id).cloned())
            .collect();
        PostWithTags {
            post,
            tags: resolved,
        }
    }
}

#[async_trait]
impl DocumentStore<Post> for InMemoryPostStore {
    async fn save(&self, entity: Post) -> Result<Post, StoreError> {
        self.posts.save(entity).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
        self.posts.find_by_id(id).await
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Vec<Post>, StoreError> {
        self.posts.find_all(page).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        self.posts.delete_by_id(id).await
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.posts.count().await
    }
}

#[async_trait]
impl PostStore for InMemoryPostStore {
    async fn find_all_with_tags(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<PostWithTags>, StoreError> {
        let posts = self.posts.find_all(page).await?;
        let mut resolved = Vec::with_capacity(posts.len());
        for post in posts {
            resolved.push(self.resolve(post).await);
        }
        Ok(resolved)
    }

    async fn find_one_with_tags(&self, id: &str) -> Result<Option<PostWithTags>, StoreError> {
        match self.posts.find_by_id(id).await? {
            Some(post) => Ok(Some(self.resolve(post).await)),
            None => Ok(None),
        }
    }
}
