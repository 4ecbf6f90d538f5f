//! Herd grouping model. Herds are referenced by animals but carry no slug.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type HerdId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Herd {
    pub id: HerdId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Herd {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHerd {
    pub name: String,
    pub description: Option<String>,
}

impl NewHerd {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HerdPatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl HerdPatch {
    pub fn apply_to(&self, herd: &mut Herd) {
        if let Some(name) = &self.name {
            herd.name = name.clone();
        }
        if let Some(description) = &self.description {
            herd.description = description.clone();
        }
    }
}
