//! Static page model.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type PageId = Uuid;

/// Stored static page. `slug` is derived from `title`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub meta_description: Option<String>,
    pub is_published: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Page {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

/// Input for creating a page. Pages start unpublished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPage {
    pub title: String,
    pub body: String,
    pub meta_description: Option<String>,
    pub is_published: bool,
}

impl NewPage {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            meta_description: None,
            is_published: false,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(description.into());
        self
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)
    }
}

/// Partial update for a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagePatch {
    pub title: Option<String>,
    pub body: Option<String>,
    pub meta_description: Option<Option<String>>,
    pub is_published: Option<bool>,
}

impl PagePatch {
    pub fn apply_to(&self, page: &mut Page) {
        if let Some(title) = &self.title {
            page.title = title.clone();
        }
        if let Some(body) = &self.body {
            page.body = body.clone();
        }
        if let Some(meta_description) = &self.meta_description {
            page.meta_description = meta_description.clone();
        }
        if let Some(is_published) = self.is_published {
            page.is_published = is_published;
        }
    }
}
