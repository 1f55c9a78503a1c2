//! In-memory search index - used as fallback when Elasticsearch is
//! unavailable, and as the primable index in tests.
//!
//! Supports a small subset of the query-string grammar: whitespace-
//! separated terms, each either `field:value` or a bare value, combined
//! with OR. Matching is a case-insensitive substring test against the
//! document's serialized fields. Anything richer belongs to the real
//! search backend.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use blog_core::domain::Entity;
use blog_core::error::SearchError;
use blog_core::page::PageRequest;
use blog_core::ports::SearchIndex;

use crate::paging::sort_and_page;

struct Inner<T> {
    by_id: HashMap<String, T>,
    order: Vec<String>,
}

pub struct InMemoryIndex<T: Entity> {
    docs: RwLock<Inner<T>>,
}

impl<T: Entity> InMemoryIndex<T> {
    pub fn new() -> Self {
        Self {
            docs: RwLock::new(Inner {
                by_id: HashMap::new(),
                order: Vec::new(),
            }),
        }
    }
}

impl<T: Entity> Default for InMemoryIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn matches(doc: &Value, query: &str) -> bool {
    query
        .split_whitespace()
        .filter(|term| !term.eq_ignore_ascii_case("OR"))
        .any(|term| match term.split_once(':') {
            Some((field, value)) => field_contains(doc.get(field), value),
            None => doc
                .as_object()
                .is_some_and(|map| map.values().any(|v| field_contains(Some(v), term))),
        })
}

fn field_contains(value: Option<&Value>, needle: &str) -> bool {
    match value {
        Some(Value::String(s)) => s.to_lowercase().contains(&needle.to_lowercase()),
        Some(Value::Array(items)) => items.iter().any(|v| field_contains(Some(v), needle)),
        Some(Value::Number(n)) => n.to_string() == needle,
        _ => false,
    }
}

#[async_trait]
impl<T: Entity> SearchIndex<T> for InMemoryIndex<T> {
    async fn save(&self, entity: &T) -> Result<(), SearchError> {
        let id = entity
            .id()
            .ok_or_else(|| {
                SearchError::Serialization("cannot index an entity without an id".to_string())
            })?
            .to_owned();

        let mut docs = self.docs.write().await;
        if docs.by_id.insert(id.clone(), entity.clone()).is_none() {
            docs.order.push(id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), SearchError> {
        let mut docs = self.docs.write().await;
        if docs.by_id.remove(id).is_some() {
            docs.order.retain(|k| k != id);
        }
        Ok(())
    }

    async fn search(&self, query: &str, page: &PageRequest) -> Result<Vec<T>, SearchError> {
        let docs = self.docs.read().await;
        let hits: Vec<T> = docs
            .order
            .iter()
            .filter_map(|id| docs.by_id.get(id))
            .filter(|entity| {
                serde_json::to_value(entity).is_ok_and(|value| matches(&value, query))
            })
            .cloned()
            .collect();
        Ok(sort_and_page(hits, page))
    }

    async fn count(&self) -> Result<u64, SearchError> {
        Ok(self.docs.read().await.by_id.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_core::domain::Blog;
    use blog_core::page::{PageRequest, Sort};

    async fn index_with(blogs: &[(&str, &str, &str)]) -> InMemoryIndex<Blog> {
        let index = InMemoryIndex::new();
        for (id, name, handle) in blogs {
            let mut blog = Blog::new(*name, *handle);
            blog.id = Some((*id).to_string());
            index.save(&blog).await.unwrap();
        }
        index
    }

    #[tokio::test]
    async fn bare_terms_match_any_string_field() {
        let index = index_with(&[
            ("1", "Rust notes", "rust"),
            ("2", "Gardening", "soil"),
        ])
        .await;

        let hits = index.search("rust", &PageRequest::default()).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn field_terms_match_only_that_field() {
        let index = index_with(&[
            ("1", "shared", "alpha"),
            ("2", "other", "shared"),
        ])
        .await;

        let hits = index
            .search("name:shared", &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id.as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn terms_combine_with_or() {
        let index = index_with(&[
            ("1", "alpha", "a"),
            ("2", "bravo", "b"),
            ("3", "charlie", "c"),
        ])
        .await;

        let hits = index
            .search("alpha OR bravo", &PageRequest::default())
            .await
            .unwrap();
        assert_eq!(hits.len(), 2);
    }

    #[tokio::test]
    async fn no_match_is_an_empty_result() {
        let index = index_with(&[("1", "alpha", "a")]).await;

        let hits = index
            .search("zulu", &PageRequest::default())
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn save_upserts_by_id_and_delete_is_idempotent() {
        let index = index_with(&[("1", "old", "h")]).await;

        let mut updated = Blog::new("new", "h");
        updated.id = Some("1".to_string());
        index.save(&updated).await.unwrap();
        assert_eq!(index.count().await.unwrap(), 1);

        let hits = index.search("new", &PageRequest::default()).await.unwrap();
        assert_eq!(hits.len(), 1);

        index.delete_by_id("1").await.unwrap();
        index.delete_by_id("1").await.unwrap();
        assert_eq!(index.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn results_honor_the_sort_key() {
        let index = index_with(&[
            ("1", "match bravo", "b"),
            ("2", "match alpha", "a"),
        ])
        .await;

        let page = PageRequest::default().with_sort(Sort::asc("handle"));
        let hits = index.search("match", &page).await.unwrap();
        let handles: Vec<_> = hits.iter().map(|b| b.handle.clone().unwrap()).collect();
        assert_eq!(handles, ["a", "b"]);
    }
}
