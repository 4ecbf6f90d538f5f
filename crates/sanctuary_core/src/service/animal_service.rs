//! Animal use-case service.
//!
//! # Responsibility
//! - Provide authenticated create/update/delete entry points for animals.
//! - Provide public slug lookup for profile pages.
//!
//! # Invariants
//! - Service APIs never bypass repository slug reconciliation.
//! - Service layer remains storage-agnostic.

use crate::model::animal::{Animal, AnimalId, AnimalPatch, NewAnimal};
use crate::model::principal::AuthContext;
use crate::model::slug::slugify;
use crate::repo::animal_repo::{AnimalListQuery, AnimalRepository};
use crate::service::{log_mutation, require_authenticated, ServiceError, ServiceResult};

/// Use-case service wrapper for animal profiles.
pub struct AnimalService<R: AnimalRepository> {
    repo: R,
}

impl<R: AnimalRepository> AnimalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an animal whose slug is derived from `draft.name`.
    ///
    /// # Errors
    /// - `AuthenticationRequired` without a principal.
    /// - `DuplicateSlug` when another animal already derives the same slug;
    ///   nothing is written.
    pub fn create_animal(&self, ctx: &AuthContext, draft: &NewAnimal) -> ServiceResult<AnimalId> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.create_animal(draft).map_err(ServiceError::from));
        log_mutation("animal_create", ctx, outcome, |id| {
            format!("animal_id={id} slug={}", slugify(&draft.name))
        })
    }

    /// Applies a partial update.
    ///
    /// The slug is re-derived only when `patch.name` changes it; on conflict
    /// the whole patch is rejected.
    pub fn update_animal(
        &self,
        ctx: &AuthContext,
        id: AnimalId,
        patch: &AnimalPatch,
    ) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.update_animal(id, patch).map_err(ServiceError::from));
        log_mutation("animal_update", ctx, outcome, |_| {
            format!("animal_id={id} renamed={}", patch.name.is_some())
        })
    }

    /// Deletes an animal. Unknown ids are not an error.
    pub fn delete_animal(&self, ctx: &AuthContext, id: AnimalId) -> ServiceResult<()> {
        let outcome = require_authenticated(ctx)
            .and_then(|_| self.repo.delete_animal(id).map_err(ServiceError::from));
        log_mutation("animal_delete", ctx, outcome, |_| format!("animal_id={id}"))
    }

    pub fn get_animal(&self, id: AnimalId) -> ServiceResult<Option<Animal>> {
        Ok(self.repo.get_animal(id)?)
    }

    /// Public profile lookup. Returns `None` when no animal uses `slug`.
    pub fn get_animal_by_slug(&self, slug: &str) -> ServiceResult<Option<Animal>> {
        Ok(self.repo.get_animal_by_slug(slug)?)
    }

    pub fn list_animals(&self, query: &AnimalListQuery) -> ServiceResult<Vec<Animal>> {
        Ok(self.repo.list_animals(query)?)
    }
}
