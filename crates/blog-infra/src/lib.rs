//! # Blog Infra
//!
//! Concrete implementations of the ports defined in `blog-core`:
//! MongoDB primary store, Elasticsearch search index, and in-memory
//! fallbacks for both.
//!
//! ## Feature Flags
//!
//! - `full` (default) - MongoDB + Elasticsearch adapters
//! - `minimal` - No external dependencies, in-memory only
//! - `mongodb` - MongoDB primary store
//! - `elasticsearch` - Elasticsearch search index

mod paging;
pub mod search;
pub mod store;

// Re-exports - In-Memory
pub use search::InMemoryIndex;
pub use store::{InMemoryPostStore, InMemoryStore};

// Re-exports - external backends
#[cfg(feature = "elasticsearch")]
pub use search::{ElasticConfig, ElasticIndex};
#[cfg(feature = "mongodb")]
pub use store::{MongoConfig, MongoStore};
