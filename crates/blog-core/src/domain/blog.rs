use serde::{Deserialize, Serialize};

use crate::domain::Entity;
use crate::error::DomainError;

/// Blog entity - a named publication that posts belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl Blog {
    /// Create a new blog with no id; the store assigns one on save.
    pub fn new(name: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            handle: Some(handle.into()),
        }
    }
}

impl Entity for Blog {
    const ENTITY_NAME: &'static str = "blog";

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
        if patch.handle.is_some() {
            self.handle = patch.handle;
        }
    }

    fn validate(&self) -> Result<(), DomainError> {
        if self.name.as_deref().is_none_or(str::is_empty) {
            return Err(DomainError::Validation("name is required".to_string()));
        }
        if self.handle.as_deref().is_none_or(str::is_empty) {
            return Err(DomainError::Validation("handle is required".to_string()));
        }
        Ok(())
    }
}
