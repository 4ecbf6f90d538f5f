//! Administrator account use-case service.
//!
//! # Responsibility
//! - One-time bootstrap of the first admin account.
//! - Admin-only account management.
//! - Resolve a login e-mail into an `AuthContext` for callers.
//!
//! # Invariants
//! - Bootstrap always creates an `Admin`, regardless of the draft role.
//! - Account mutations after bootstrap require `Role::Admin`.

use crate::model::principal::{AuthContext, Principal, Role};
use crate::model::user::{NewUser, User, UserId};
use crate::repo::user_repo::UserRepository;
use crate::service::{log_mutation, require_role, ServiceError, ServiceResult};

pub struct UserService<R: UserRepository> {
    repo: R,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates the first administrator.
    ///
    /// # Errors
    /// - `BootstrapClosed` once any account exists.
    pub fn bootstrap_admin(
        &self,
        email: &str,
        display_name: &str,
    ) -> ServiceResult<UserId> {
        let draft = NewUser::new(email, display_name, Role::Admin);
        let outcome = self
            .repo
            .create_first_user(&draft)
            .map_err(ServiceError::from)
            .and_then(|created| created.ok_or(ServiceError::BootstrapClosed));
        log_mutation("user_bootstrap", &AuthContext::anonymous(), outcome, |id| {
            format!("user_id={id}")
        })
    }

    pub fn create_user(&self, ctx: &AuthContext, draft: &NewUser) -> ServiceResult<UserId> {
        let outcome = require_role(ctx, Role::Admin)
            .and_then(|_| self.repo.create_user(draft).map_err(ServiceError::from));
        log_mutation("user_create", ctx, outcome, |id| {
            format!("user_id={id} role={}", draft.role)
        })
    }

    pub fn set_user_role(&self, ctx: &AuthContext, id: UserId, role: Role) -> ServiceResult<()> {
        let outcome = require_role(ctx, Role::Admin)
            .and_then(|_| self.repo.set_role(id, role).map_err(ServiceError::from));
        log_mutation("user_set_role", ctx, outcome, |_| {
            format!("user_id={id} role={role}")
        })
    }

    pub fn get_user(&self, id: UserId) -> ServiceResult<Option<User>> {
        Ok(self.repo.get_user(id)?)
    }

    pub fn find_user_by_email(&self, email: &str) -> ServiceResult<Option<User>> {
        Ok(self.repo.find_by_email(email)?)
    }

    pub fn list_users(&self) -> ServiceResult<Vec<User>> {
        Ok(self.repo.list_users()?)
    }

    /// Builds an authenticated context for the account registered as `email`.
    ///
    /// Session handling lives with the caller; this only maps an identity that
    /// the caller has already verified.
    pub fn resolve_principal(&self, email: &str) -> ServiceResult<AuthContext> {
        let user = self
            .repo
            .find_by_email(email)?
            .ok_or_else(|| ServiceError::UnknownUser(email.trim().to_string()))?;
        Ok(AuthContext::authenticated(Principal::from(&user)))
    }
}
