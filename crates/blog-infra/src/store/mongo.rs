//! MongoDB primary store.

use std::collections::{BTreeSet, HashMap};
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, Bson, Document, doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection, Database};

use blog_core::domain::{Entity, Post, PostWithTags, Tag};
use blog_core::error::StoreError;
use blog_core::page::{Direction, PageRequest};
use blog_core::ports::{DocumentStore, PostStore};

/// Configuration for the primary store.
#[derive(Debug, Clone)]
pub struct MongoConfig {
    pub url: String,
    pub database: String,
}

/// Connect to MongoDB and return the database handle.
pub async fn connect(config: &MongoConfig) -> Result<Database, StoreError> {
    tracing::info!("Connecting to MongoDB...");

    let mut options = ClientOptions::parse(&config.url)
        .await
        .map_err(|e| StoreError::Connection(e.to_string()))?;
    options.connect_timeout = Some(Duration::from_secs(10));

    let client =
        Client::with_options(options).map_err(|e| StoreError::Connection(e.to_string()))?;
    tracing::info!(database = %config.database, "MongoDB connected");

    Ok(client.database(&config.database))
}

/// Generic MongoDB store, one collection per entity type.
pub struct MongoStore<T: Entity> {
    db: Database,
    coll: Collection<Document>,
    _entity: PhantomData<T>,
}

impl<T: Entity> MongoStore<T> {
    pub fn new(db: Database) -> Self {
        let coll = db.collection::<Document>(T::ENTITY_NAME);
        Self {
            db,
            coll,
            _entity: PhantomData,
        }
    }
}

/// Entity -> stored document: the `id` field moves to `_id`.
fn to_stored<T: Entity>(entity: &T) -> Result<Document, StoreError> {
    let mut doc =
        bson::to_document(entity).map_err(|e| StoreError::Serialization(e.to_string()))?;
    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }
    Ok(doc)
}

/// Stored document -> entity: `_id` moves back to `id`.
fn from_stored<T: Entity>(mut doc: Document) -> Result<T, StoreError> {
    if let Some(id) = doc.remove("_id") {
        let id = match id {
            Bson::ObjectId(oid) => Bson::String(oid.to_hex()),
            other => other,
        };
        doc.insert("id", id);
    }
    bson::from_document(doc).map_err(|e| StoreError::Serialization(e.to_string()))
}

fn sort_doc(page: &PageRequest) -> Option<Document> {
    page.sort.as_ref().map(|sort| {
        let dir: i32 = match sort.direction {
            Direction::Asc => 1,
            Direction::Desc => -1,
        };
        // `id` sorts on the stored `_id`
        let field = if sort.field == "id" {
            "_id"
        } else {
            sort.field.as_str()
        };
        let mut doc = Document::new();
        doc.insert(field, dir);
        doc
    })
}

#[async_trait]
impl<T: Entity> DocumentStore<T> for MongoStore<T> {
    async fn save(&self, mut entity: T) -> Result<T, StoreError> {
        if entity.id().is_none() {
            entity.set_id(ObjectId::new().to_hex());
        }
        let id = entity.id().expect("id assigned above").to_owned();
        let doc = to_stored(&entity)?;

        self.coll
            .replace_one(doc! { "_id": &id }, doc)
            .upsert(true)
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(entity)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let found = self
            .coll
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        found.map(from_stored).transpose()
    }

    async fn find_all(&self, page: &PageRequest) -> Result<Vec<T>, StoreError> {
        let mut find = self
            .coll
            .find(doc! {})
            .skip(page.offset())
            .limit(page.size as i64);
        if let Some(sort) = sort_doc(page) {
            find = find.sort(sort);
        }

        let docs: Vec<Document> = find
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        docs.into_iter().map(from_stored).collect()
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), StoreError> {
        // deleting an absent id is not an error
        self.coll
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        self.coll
            .count_documents(doc! {})
            .await
            .map_err(|e| StoreError::Query(e.to_string()))
    }
}

impl MongoStore<Post> {
    /// Load every tag referenced by `posts` with a single `$in` query.
    async fn load_tags(&self, posts: &[Post]) -> Result<HashMap<String, Tag>, StoreError> {
        let ids: BTreeSet<String> = posts
            .iter()
            .flat_map(|p| p.tag_ids.iter().cloned())
            .collect();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let ids: Vec<String> = ids.into_iter().collect();
        let tag_coll = self.db.collection::<Document>(Tag::ENTITY_NAME);
        let docs: Vec<Document> = tag_coll
            .find(doc! { "_id": { "$in": ids } })
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        docs.into_iter()
            .map(|doc| {
                let tag: Tag = from_stored(doc)?;
                let id = tag.id().unwrap_or_default().to_owned();
                Ok((id, tag))
            })
            .collect()
    }
}

fn resolve(post: Post, tags: &HashMap<String, Tag>) -> PostWithTags {
    let resolved = post
        .tag_ids
        .iter()
        .filter_map(|id| tags.get(id).cloned())
        .collect();
    PostWithTags {
        post,
        tags: resolved,
    }
}

#[async_trait]
impl PostStore for MongoStore<Post> {
    async fn find_all_with_tags(
        &self,
        page: &PageRequest,
    ) -> Result<Vec<PostWithTags>, StoreError> {
        let posts: Vec<Post> = self.find_all(page).await?;
        let tags = self.load_tags(&posts).await?;
        Ok(posts.into_iter().map(|p| resolve(p, &tags)).collect())
    }

    async fn find_one_with_tags(&self, id: &str) -> Result<Option<PostWithTags>, StoreError> {
        let Some(post) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let tags = self.load_tags(std::slice::from_ref(&post)).await?;
        Ok(Some(resolve(post, &tags)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use mongodb::bson::{Bson, doc};

    use super::{from_stored, to_stored};
    use blog_core::domain::{Blog, Post};

    #[test]
    fn stored_documents_key_on_underscore_id() {
        let mut blog = Blog::new("name", "handle");
        blog.id = Some("abc123".to_string());

        let doc = to_stored(&blog).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), "abc123");
        assert!(!doc.contains_key("id"));

        let back: Blog = from_stored(doc).unwrap();
        assert_eq!(back, blog);
    }

    #[test]
    fn object_ids_read_back_as_hex_strings() {
        let oid = mongodb::bson::oid::ObjectId::new();
        let doc = doc! { "_id": Bson::ObjectId(oid), "name": "n", "handle": "h" };

        let blog: Blog = from_stored(doc).unwrap();
        assert_eq!(blog.id.as_deref(), Some(oid.to_hex().as_str()));
    }

    #[test]
    fn post_dates_survive_the_document_round_trip() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let mut post = Post::new("title", "content", date);
        post.id = Some("p1".to_string());
        post.tag_ids = vec!["t1".to_string()];

        let doc = to_stored(&post).unwrap();
        let back: Post = from_stored(doc).unwrap();
        assert_eq!(back, post);
    }
}
