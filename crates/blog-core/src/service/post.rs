use std::sync::Arc;

use crate::domain::{Post, PostWithTags};
use crate::error::{SearchError, StoreError};
use crate::page::PageRequest;
use crate::ports::{PostStore, SearchIndex};
use crate::service::EntityService;

/// Post service: the generic service plus eager association reads.
///
/// Point lookups resolve tags so callers never see unresolved references;
/// list reads offer both plain and eager variants.
pub struct PostService {
    entity: EntityService<Post>,
    store: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new<S>(store: Arc<S>, index: Arc<dyn SearchIndex<Post>>) -> Self
    where
        S: PostStore + 'static,
    {
        let eager: Arc<dyn PostStore> = store.clone();
        Self {
            entity: EntityService::new(store, index),
            store: eager,
        }
    }

    pub async fn save(&self, post: Post) -> Result<Post, StoreError> {
        self.entity.save(post).await
    }

    pub async fn partial_update(&self, patch: Post) -> Result<Option<Post>, StoreError> {
        self.entity.partial_update(patch).await
    }

    pub async fn find_all(&self, page: &PageRequest) -> Result<Vec<Post>, StoreError> {
        self.entity.find_all(page).await
    }

    pub async fn find_all_with_tags(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<PostWithTags>, StoreError> {
        tracing::debug!("request to get all posts with eager tags");
        self.store.find_all_with_tags(page).await
    }

    /// Point lookup with tags resolved.
    pub async fn find_one(&self, id: &str) -> Result<Option<PostWithTags>, StoreError> {
        tracing::debug!(id, "request to get post");
        self.store.find_one_with_tags(id).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.entity.delete(id).await
    }

    pub async fn count_all(&self) -> Result<u64, StoreError> {
        self.entity.count_all().await
    }

    pub async fn search_count(&self) -> Result<u64, SearchError> {
        self.entity.search_count().await
    }

    pub async fn search(&self, query: &str, page: &PageRequest) -> Result<Vec<Post>, SearchError> {
        self.entity.search(query, page).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use super::PostService;
    use crate::domain::{Entity, Post, PostWithTags, Tag};
    use crate::error::{SearchError, StoreError};
    use crate::page::PageRequest;
    use crate::ports::{DocumentStore, PostStore, SearchIndex};

    /// Post-store stub with a fixed tag universe for eager resolution.
    struct StubPostStore {
        posts: Mutex<Vec<(String, Post)>>,
        tags: HashMap<String, Tag>,
        seq: AtomicU64,
    }

    impl StubPostStore {
        fn new(tags: Vec<Tag>) -> Arc<Self> {
            let tags = tags
                .into_iter()
                .map(|t| (t.id.clone().expect("tag id"), t))
                .collect();
            Arc::new(Self {
                posts: Mutex::new(Vec::new()),
                tags,
                seq: AtomicU64::new(0),
            })
        }

        fn resolve(&self, post: Post) -> PostWithTags {
            let tags = post
                .tag_ids
                .iter()
                .filter_map(|id| self.tags.get(id).cloned())
                .collect();
            PostWithTags { post, tags }
        }
    }

    #[async_trait]
    impl DocumentStore<Post> for StubPostStore {
        async fn save(&self, mut entity: Post) -> Result<Post, StoreError> {
            let mut posts = self.posts.lock().await;
            match entity.id().map(str::to_owned) {
                Some(id) => {
                    if let Some(slot) = posts.iter_mut().find(|(k, _)| *k == id) {
                        slot.1 = entity.clone();
                    } else {
                        posts.push((id, entity.clone()));
                    }
                }
                None => {
                    let id = format!("post-{}", self.seq.fetch_add(1, Ordering::SeqCst));
                    entity.set_id(id.clone());
                    posts.push((id, entity.clone()));
                }
            }
            Ok(entity)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Post>, StoreError> {
            let posts = self.posts.lock().await;
            Ok(posts.iter().find(|(k, _)| k == id).map(|(_, p)| p.clone()))
        }

        async fn find_all(&self, _page: &PageRequest) -> Result<Vec<Post>, StoreError> {
            let posts = self.posts.lock().await;
            Ok(posts.iter().map(|(_, p)| p.clone()).collect())
        }

        async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
            self.posts.lock().await.retain(|(k, _)| k != id);
            Ok(())
        }

        async fn count(&self) -> Result<u64, StoreError> {
            Ok(self.posts.lock().await.len() as u64)
        }
    }

    #[async_trait]
    impl PostStore for StubPostStore {
        async fn find_all_with_tags(
            &self,
            page: &PageRequest,
        ) -> Result<Vec<PostWithTags>, StoreError> {
            let posts = self.find_all(page).await?;
            Ok(posts.into_iter().map(|p| self.resolve(p)).collect())
        }

        async fn find_one_with_tags(&self, id: &str) -> Result<Option<PostWithTags>, StoreError> {
            Ok(self.find_by_id(id).await?.map(|p| self.resolve(p)))
        }
    }

    struct StubIndex {
        docs: Mutex<HashMap<String, Post>>,
    }

    impl StubIndex {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                docs: Mutex::new(HashMap::new()),
            })
        }
    }

    #[async_trait]
    impl SearchIndex<Post> for StubIndex {
        async fn save(&self, entity: &Post) -> Result<(), SearchError> {
            let id = entity.id().expect("indexed post must have an id");
            self.docs
                .lock()
                .await
                .insert(id.to_owned(), entity.clone());
            Ok(())
        }

        async fn delete_by_id(&self, id: &str) -> Result<(), SearchError> {
            self.docs.lock().await.remove(id);
            Ok(())
        }

        async fn search(&self, query: &str, _page: &PageRequest) -> Result<Vec<Post>, SearchError> {
            let docs = self.docs.lock().await;
            Ok(docs
                .values()
                .filter(|p| p.title.as_deref().is_some_and(|t| t.contains(query)))
                .cloned()
                .collect())
        }

        async fn count(&self) -> Result<u64, SearchError> {
            Ok(self.docs.lock().await.len() as u64)
        }
    }

    fn tag(id: &str, name: &str) -> Tag {
        let mut tag = Tag::new(name);
        tag.id = Some(id.to_string());
        tag
    }

    fn post_with_tags(tag_ids: &[&str]) -> Post {
        use chrono::TimeZone;
        let date = chrono::Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut post = Post::new("title", "content", date);
        post.tag_ids = tag_ids.iter().map(|s| s.to_string()).collect();
        post
    }

    #[tokio::test]
    async fn point_lookup_resolves_tags() {
        let store = StubPostStore::new(vec![tag("t1", "rust"), tag("t2", "actix")]);
        let svc = PostService::new(store, StubIndex::new());

        let saved = svc.save(post_with_tags(&["t1", "t2", "dangling"])).await.unwrap();
        let eager = svc
            .find_one(saved.id().unwrap())
            .await
            .unwrap()
            .expect("exists");

        let names: Vec<_> = eager.tags.iter().map(|t| t.name.clone().unwrap()).collect();
        assert_eq!(names, ["rust", "actix"]);
    }

    #[tokio::test]
    async fn eager_list_resolves_every_post() {
        let store = StubPostStore::new(vec![tag("t1", "rust")]);
        let svc = PostService::new(store, StubIndex::new());

        svc.save(post_with_tags(&["t1"])).await.unwrap();
        svc.save(post_with_tags(&[])).await.unwrap();

        let all = svc.find_all_with_tags(&PageRequest::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].tags.len(), 1);
        assert!(all[1].tags.is_empty());
    }

    #[tokio::test]
    async fn writes_flow_through_the_dual_write_path() {
        let store = StubPostStore::new(Vec::new());
        let svc = PostService::new(store, StubIndex::new());

        let saved = svc.save(post_with_tags(&[])).await.unwrap();
        assert_eq!(svc.count_all().await.unwrap(), 1);
        assert_eq!(svc.search_count().await.unwrap(), 1);

        svc.delete(saved.id().unwrap()).await.unwrap();
        assert_eq!(svc.count_all().await.unwrap(), 0);
        assert_eq!(svc.search_count().await.unwrap(), 0);
    }
}
