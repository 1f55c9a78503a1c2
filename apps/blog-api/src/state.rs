//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::domain::{Blog, Post, Tag};
use blog_core::ports::SearchIndex;
use blog_core::service::{EntityService, PostService};
use blog_infra::search::{self, ElasticIndex, InMemoryIndex};
use blog_infra::store::{self, InMemoryPostStore, InMemoryStore, MongoStore};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<EntityService<Blog>>,
    pub posts: Arc<PostService>,
    pub tags: Arc<EntityService<Tag>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    ///
    /// Either store degrades to its in-memory fallback when it is not
    /// configured or cannot be reached.
    pub async fn new(config: &AppConfig) -> Self {
        let db = match &config.mongo {
            Some(mongo) => match store::connect(mongo).await {
                Ok(db) => Some(db),
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to MongoDB: {}. Using in-memory stores.",
                        e
                    );
                    None
                }
            },
            None => {
                tracing::warn!("MONGODB_URL not set. Running with in-memory stores.");
                None
            }
        };

        let es = match &config.elastic {
            Some(elastic) => match search::connect(elastic) {
                Ok(client) => Some(client),
                Err(e) => {
                    tracing::error!(
                        "Failed to build Elasticsearch client: {}. Using in-memory indexes.",
                        e
                    );
                    None
                }
            },
            None => {
                tracing::warn!("ELASTICSEARCH_URL not set. Running with in-memory search indexes.");
                None
            }
        };

        let blog_index: Arc<dyn SearchIndex<Blog>> = match &es {
            Some(client) => Arc::new(ElasticIndex::new(client.clone())),
            None => Arc::new(InMemoryIndex::new()),
        };
        let post_index: Arc<dyn SearchIndex<Post>> = match &es {
            Some(client) => Arc::new(ElasticIndex::new(client.clone())),
            None => Arc::new(InMemoryIndex::new()),
        };
        let tag_index: Arc<dyn SearchIndex<Tag>> = match &es {
            Some(client) => Arc::new(ElasticIndex::new(client.clone())),
            None => Arc::new(InMemoryIndex::new()),
        };

        let state = match db {
            Some(db) => Self {
                blogs: Arc::new(EntityService::new(
                    Arc::new(MongoStore::<Blog>::new(db.clone())),
                    blog_index,
                )),
                posts: Arc::new(PostService::new(
                    Arc::new(MongoStore::<Post>::new(db.clone())),
                    post_index,
                )),
                tags: Arc::new(EntityService::new(
                    Arc::new(MongoStore::<Tag>::new(db)),
                    tag_index,
                )),
            },
            None => {
                let tag_store = Arc::new(InMemoryStore::<Tag>::new());
                Self {
                    blogs: Arc::new(EntityService::new(
                        Arc::new(InMemoryStore::<Blog>::new()),
                        blog_index,
                    )),
                    posts: Arc::new(PostService::new(
                        Arc::new(InMemoryPostStore::new(tag_store.clone())),
                        post_index,
                    )),
                    tags: Arc::new(EntityService::new(tag_store, tag_index)),
                }
            }
        };

        tracing::info!("Application state initialized");
        state
    }

    /// All-in-memory state used by the handler tests.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        let tag_store = Arc::new(InMemoryStore::<Tag>::new());
        Self {
            blogs: Arc::new(EntityService::new(
                Arc::new(InMemoryStore::<Blog>::new()),
                Arc::new(InMemoryIndex::new()),
            )),
            posts: Arc::new(PostService::new(
                Arc::new(InMemoryPostStore::new(tag_store.clone())),
                Arc::new(InMemoryIndex::new()),
            )),
            tags: Arc::new(EntityService::new(
                tag_store,
                Arc::new(InMemoryIndex::new()),
            )),
        }
    }
}
