use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Entity, Tag};
use crate::error::DomainError;

/// Post entity - an article published on a blog, labelled with tags.
///
/// `blog_id` and `tag_ids` hold references; eager reads resolve `tag_ids`
/// into [`PostWithTags`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blog_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tag_ids: Vec<String>,
}

impl Post {
    pub fn new(title: impl Into<String>, content: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: None,
            title: Some(title.into()),
            content: Some(content.into()),
            date: Some(date),
            blog_id: None,
            tag_ids: Vec::new(),
        }
    }
}

impl Entity for Post {
    const ENTITY_NAME: &'static str = "post";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    /// Only the settable scalar fields participate in merge-patch;
    /// associations are replaced wholesale by full updates.
    fn merge(&mut self, patch: Self) {
        if patch.title.is_some() {
            self.title = patch.title;
        }
        if patch.content.is_some() {
            self.content = patch.content;
        }
        if patch.date.is_some() {
            self.date = patch.date;
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.title.as_deref().is_none_or(str::is_empty) {
            return Err(DomainError::Validation("title is required".to_string()));
        }
        if self.content.as_deref().is_none_or(str::is_empty) {
            return Err(DomainError::Validation("content is required".to_string()));
        }
        if self.date.is_none() {
            return Err(DomainError::Validation("date is required".to_string()));
        }
        Ok(())
    }
}

/// A post with its tag references resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithTags {
    #[serde(flatten)]
    pub post: Post,
    #[serde(default)]
    pub tags: Vec<Tag>,
}
