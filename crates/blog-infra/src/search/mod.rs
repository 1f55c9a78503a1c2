//! Search-index adapters.

mod memory;

#[cfg(feature = "elasticsearch")]
mod elastic;

pub use memory::InMemoryIndex;

#[cfg(feature = "elasticsearch")]
pub use elastic::{ElasticConfig, ElasticIndex, connect};
