//! Elasticsearch search index.
//!
//! One index per entity type, keyed by the primary-store id. Queries go
//! through the query-string grammar (bare terms, `field:value` terms,
//! boolean operators), so the index owns all free-text parsing.

use std::marker::PhantomData;

use async_trait::async_trait;
use elasticsearch::http::transport::Transport;
use elasticsearch::{CountParts, DeleteParts, Elasticsearch, IndexParts, SearchParts};
use serde_json::{Value, json};

use blog_core::domain::Entity;
use blog_core::error::SearchError;
use blog_core::page::{Direction, PageRequest};
use blog_core::ports::SearchIndex;

/// Configuration for the search index.
#[derive(Debug, Clone)]
pub struct ElasticConfig {
    pub url: String,
}

/// Build an Elasticsearch client for a single node.
pub fn connect(config: &ElasticConfig) -> Result<Elasticsearch, SearchError> {
    let transport = Transport::single_node(&config.url)
        .map_err(|e| SearchError::Connection(e.to_string()))?;
    tracing::info!(url = %config.url, "Elasticsearch client ready");
    Ok(Elasticsearch::new(transport))
}

/// Generic Elasticsearch index, one index per entity type.
pub struct ElasticIndex<T: Entity> {
    client: Elasticsearch,
    index: String,
    _entity: PhantomData<T>,
}

impl<T: Entity> ElasticIndex<T> {
    pub fn new(client: Elasticsearch) -> Self {
        Self {
            client,
            index: T::ENTITY_NAME.to_string(),
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<T: Entity> SearchIndex<T> for ElasticIndex<T> {
    async fn save(&self, entity: &T) -> Result<(), SearchError> {
        let id = entity.id().ok_or_else(|| {
            SearchError::Serialization("cannot index an entity without an id".to_string())
        })?;

        let response = self
            .client
            .index(IndexParts::IndexId(&self.index, id))
            .body(entity)
            .send()
            .await
            .map_err(|e| SearchError::Connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::Query(format!(
                "index write returned {}",
                response.status_code()
            )));
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index, id))
            .send()
            .await
            .map_err(|e| SearchError::Connection(e.to_string()))?;

        // deleting an absent document is not an error
        let status = response.status_code();
        if !status.is_success() && status.as_u16() != 404 {
            return Err(SearchError::Query(format!(
                "index delete returned {status}"
            )));
        }
        Ok(())
    }

    async fn search(&self, query: &str, page: &PageRequest) -> Result<Vec<T>, SearchError> {
        let mut body = json!({
            "query": { "query_string": { "query": query } },
            "from": page.offset(),
            "size": page.size,
        });
        if let Some(sort) = &page.sort {
            let order = match sort.direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };
            body["sort"] = json!([{ (sort.field.clone()): { "order": order } }]);
        }

        let response = self
            .client
            .search(SearchParts::Index(&[self.index.as_str()]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::Connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::Query(format!(
                "search returned {}",
                response.status_code()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Serialization(e.to_string()))?;
        let hits = body["hits"]["hits"].as_array().cloned().unwrap_or_default();

        hits.into_iter()
            .map(|hit| {
                serde_json::from_value(hit["_source"].clone())
                    .map_err(|e| SearchError::Serialization(e.to_string()))
            })
            .collect()
    }

    async fn count(&self) -> Result<u64, SearchError> {
        let response = self
            .client
            .count(CountParts::Index(&[self.index.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::Connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::Query(format!(
                "count returned {}",
                response.status_code()
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Serialization(e.to_string()))?;
        Ok(body["count"].as_u64().unwrap_or(0))
    }
}
