//! Static page use-case service.

use crate::model::page::{NewPage, Page, PageId, PagePatch};
use crate::model::principal::AuthContext;
use crate::model::slug::slugify;
use crate::repo::page_repo::{PageListQuery, PageRepository};
use crate::service::{log_mutation, require_authenticated, ServiceError, ServiceResult};

pub struct PageService<R: PageRepository> {
    repo: R,
}

impl<R: PageRepository> PageService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_page(&self, ctx: &AuthContext, draft: &NewPage) -> ServiceResult<PageId> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.create_page(draft).map_err(ServiceError::from));
        log_mutation("page_create", ctx, outcome, |id| {
            format!("page_id={id} slug={}", slugify(&draft.title))
        })
    }

    pub fn update_page(
        &self,
        ctx: &AuthContext,
        id: PageId,
        patch: &PagePatch,
    ) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.update_page(id, patch).map_err(ServiceError::from));
        log_mutation("page_update", ctx, outcome, |_| {
            format!("page_id={id} renamed={}", patch.title.is_some())
        })
    }

    pub fn delete_page(&self, ctx: &AuthContext, id: PageId) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.delete_page(id).map_err(ServiceError::from));
        log_mutation("page_delete", ctx, outcome, |_| format!("page_id={id}"))
    }

    pub fn get_page(&self, id: PageId) -> ServiceResult<Option<Page>> {
        Ok(self.repo.get_page(id)?)
    }

    pub fn get_page_by_slug(&self, slug: &str) -> ServiceResult<Option<Page>> {
        Ok(self.repo.get_page_by_slug(slug)?)
    }

    pub fn list_pages(&self, query: &PageListQuery) -> ServiceResult<Vec<Page>> {
        Ok(self.repo.list_pages(query)?)
    }
}
