//! News article model.
//!
//! # Invariants
//! - `slug` is derived from `title` and unique across live articles.
//! - A published article always carries `published_at`.

use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ArticleId = Uuid;

/// Editorial state of an article.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleStatus {
    Draft,
    Published,
}

impl ArticleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "draft" => Some(Self::Draft),
            "published" => Some(Self::Published),
            _ => None,
        }
    }
}

/// Stored article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub slug: String,
    pub author: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub status: ArticleStatus,
    /// Epoch milliseconds; set the first time the article is published.
    pub published_at: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Article {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)
    }

    /// Stamps `published_at` when the article is published without one.
    pub fn stamp_publication(&mut self, now: i64) {
        if self.status == ArticleStatus::Published && self.published_at.is_none() {
            self.published_at = Some(now);
        }
    }
}

/// Input for creating an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub author: String,
    pub excerpt: Option<String>,
    pub body: String,
    pub status: ArticleStatus,
}

impl NewArticle {
    /// Starts a draft article.
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            excerpt: None,
            body: String::new(),
            status: ArticleStatus::Draft,
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    pub fn published(mut self) -> Self {
        self.status = ArticleStatus::Published;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("title", &self.title)?;
        require_text("author", &self.author)
    }
}

/// Partial update for an article. See [`crate::model::animal::AnimalPatch`]
/// for the `Option` conventions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub excerpt: Option<Option<String>>,
    pub body: Option<String>,
    pub status: Option<ArticleStatus>,
}

impl ArticlePatch {
    pub fn apply_to(&self, article: &mut Article) {
        if let Some(title) = &self.title {
            article.title = title.clone();
        }
        if let Some(author) = &self.author {
            article.author = author.clone();
        }
        if let Some(excerpt) = &self.excerpt {
            article.excerpt = excerpt.clone();
        }
        if let Some(body) = &self.body {
            article.body = body.clone();
        }
        if let Some(status) = self.status {
            article.status = status;
        }
    }
}
