//! Article use-case service.
//!
//! # Responsibility
//! - Authenticated create/update/delete for news articles.
//! - Public slug lookup used by `/news/article/{slug}`.

use crate::model::article::{Article, ArticleId, ArticlePatch, ArticleStatus, NewArticle};
use crate::model::principal::AuthContext;
use crate::model::slug::slugify;
use crate::repo::article_repo::{ArticleListQuery, ArticleRepository};
use crate::service::{log_mutation, require_authenticated, ServiceError, ServiceResult};

pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_article(
        &self,
        ctx: &AuthContext,
        draft: &NewArticle,
    ) -> ServiceResult<ArticleId> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.create_article(draft).map_err(ServiceError::from));
        log_mutation("article_create", ctx, outcome, |id| {
            format!(
                "article_id={id} slug={} status={}",
                slugify(&draft.title),
                draft.status.as_str()
            )
        })
    }

    /// Applies a partial update; a title change re-derives and re-checks the
    /// slug.
    pub fn update_article(
        &self,
        ctx: &AuthContext,
        id: ArticleId,
        patch: &ArticlePatch,
    ) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.update_article(id, patch).map_err(ServiceError::from));
        log_mutation("article_update", ctx, outcome, |_| {
            format!("article_id={id} renamed={}", patch.title.is_some())
        })
    }

    pub fn delete_article(&self, ctx: &AuthContext, id: ArticleId) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.delete_article(id).map_err(ServiceError::from));
        log_mutation("article_delete", ctx, outcome, |_| format!("article_id={id}"))
    }

    pub fn get_article(&self, id: ArticleId) -> ServiceResult<Option<Article>> {
        Ok(self.repo.get_article(id)?)
    }

    pub fn get_article_by_slug(&self, slug: &str) -> ServiceResult<Option<Article>> {
        Ok(self.repo.get_article_by_slug(slug)?)
    }

    pub fn list_articles(&self, query: &ArticleListQuery) -> ServiceResult<Vec<Article>> {
        Ok(self.repo.list_articles(query)?)
    }

    /// Published articles only, newest edits first.
    pub fn list_published(&self, limit: Option<u32>, offset: u32) -> ServiceResult<Vec<Article>> {
        self.list_articles(&ArticleListQuery {
            status: Some(ArticleStatus::Published),
            limit,
            offset,
        })
    }
}
