use serde::{Deserialize, Serialize};

use crate::domain::Entity;
use crate::error::DomainError;

/// Tag entity - a label shared by many posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

impl Entity for Tag {
    const ENTITY_NAME: &'static str = "tag";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn merge(&mut self, patch: Self) {
        if patch.name.is_some() {
            self.name = patch.name;
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        // tags shorter than two characters are noise
        match self.name.as_deref() {
            None | Some("") => Err(DomainError::Validation("name is required".to_string())),
            Some(name) if name.chars().count() < 2 => Err(DomainError::Validation(
                "name must be at least 2 characters".to_string(),
            )),
            Some(_) => Ok(()),
        }
    }
}
