//! Primary-store adapters.

mod memory;

#[cfg(feature = "mongodb")]
mod mongo;

pub use memory::{InMemoryPostStore, InMemoryStore};

#[cfg(feature = "mongodb")]
pub use mongo::{MongoConfig, MongoStore, connect};
