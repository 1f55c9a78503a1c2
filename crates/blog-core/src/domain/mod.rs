//! Domain entities - the core business objects.

mod blog;
mod post;
mod tag;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::DomainError;

pub use blog::Blog;
pub use post::{Post, PostWithTags};
pub use tag::Tag;

/// Common contract of the persisted entity types.
///
/// Fields are optional so the same type carries create, replace and
/// merge-patch payloads; `id` is assigned by the primary store on first
/// insert and immutable afterwards.
pub trait Entity:
    Clone + std::fmt::Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Collection and search-index name for this entity type.
    const ENTITY_NAME: &'static str;

    fn id(&self) -> Option<&str>;

    fn set_id(&mut self, id: String);

    /// Merge-patch: overwrite only the fields present on `patch`,
    /// leaving absent fields untouched.
    fn merge(&mut self, patch: Self);

    /// Required-field validation, applied before create/replace writes.
    fn validate(&self) -> Result<(), DomainError>;
}
