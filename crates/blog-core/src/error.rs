//! Domain-level error types.

use thiserror::Error;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Id mismatch: path '{path}' vs body '{body}'")]
    IdMismatch { path: String, body: String },
}

/// Primary-store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store connection failed: {0}")]
    Connection(String),

    #[error("Store query failed: {0}")]
    Query(String),

    #[error("Store document mapping failed: {0}")]
    Serialization(String),
}

/// Search-index errors.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Search connection failed: {0}")]
    Connection(String),

    #[error("Search query failed: {0}")]
    Query(String),

    #[error("Search document mapping failed: {0}")]
    Serialization(String),
}
