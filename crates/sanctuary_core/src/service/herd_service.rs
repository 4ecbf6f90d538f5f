//! Herd use-case service.

use crate::model::herd::{Herd, HerdId, HerdPatch, NewHerd};
use crate::model::principal::AuthContext;
use crate::repo::herd_repo::HerdRepository;
use crate::service::{log_mutation, require_authenticated, ServiceError, ServiceResult};

pub struct HerdService<R: HerdRepository> {
    repo: R,
}

impl<R: HerdRepository> HerdService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_herd(&self, ctx: &AuthContext, draft: &NewHerd) -> ServiceResult<HerdId> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.create_herd(draft).map_err(ServiceError::from));
        log_mutation("herd_create", ctx, outcome, |id| format!("herd_id={id}"))
    }

    pub fn update_herd(
        &self,
        ctx: &AuthContext,
        id: HerdId,
        patch: &HerdPatch,
    ) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.update_herd(id, patch).map_err(ServiceError::from));
        log_mutation("herd_update", ctx, outcome, |_| format!("herd_id={id}"))
    }

    /// Deletes a herd. Member animals keep their `herd_id`.
    pub fn delete_herd(&self, ctx: &AuthContext, id: HerdId) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.delete_herd(id).map_err(ServiceError::from));
        log_mutation("herd_delete", ctx, outcome, |_| format!("herd_id={id}"))
    }

    pub fn get_herd(&self, id: HerdId) -> ServiceResult<Option<Herd>> {
        Ok(self.repo.get_herd(id)?)
    }

    pub fn list_herds(&self) -> ServiceResult<Vec<Herd>> {
        Ok(self.repo.list_herds()?)
    }
}
