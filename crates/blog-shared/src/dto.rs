//! Request parameter types for the API.
//!
//! Kept flat: `serde_urlencoded` (behind actix's `Query`) does not
//! support `#[serde(flatten)]` for non-string fields, so handlers take
//! these as separate extractors instead of nesting them.

use serde::{Deserialize, Serialize};

/// Pagination query parameters: `?page=0&size=20&sort=name,desc`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageParams {
    pub page: Option<u64>,
    pub size: Option<u64>,
    /// `field` or `field,asc` / `field,desc`.
    pub sort: Option<String>,
}

/// Free-text search parameter: `?query=...`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchParams {
    pub query: String,
}
