//! Core use-case services.
//!
//! # Responsibility
//! - Gate every mutation on the caller's explicit `AuthContext`.
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate repository failures into the caller-facing error taxonomy.
//!
//! # Invariants
//! - Mutations without a principal fail with `AuthenticationRequired` before
//!   touching storage.
//! - Lookups by slug are public and never require a principal.
//! - Every mutation emits one `status=ok|error` log line; no content text is
//!   logged.

pub mod animal_service;
pub mod article_service;
pub mod event_service;
pub mod herd_service;
pub mod page_service;
pub mod user_service;

use crate::model::principal::{AuthContext, Principal, Role};
use crate::model::slug::SlugKind;
use crate::model::validation::ValidationError;
use crate::repo::RepoError;
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Caller-facing error for every service operation.
#[derive(Debug)]
pub enum ServiceError {
    /// No authenticated principal was supplied.
    AuthenticationRequired,
    /// Principal lacks the role required by the operation.
    PermissionDenied { required: Role },
    /// Target record does not exist.
    NotFound { entity: &'static str, id: Uuid },
    /// Derived slug collides with another record of the same kind.
    DuplicateSlug { kind: SlugKind, slug: String },
    /// E-mail address is already registered.
    DuplicateEmail(String),
    /// Input failed field validation.
    Validation(ValidationError),
    /// An administrator already exists; bootstrap is a one-time operation.
    BootstrapClosed,
    /// No user matches the given e-mail address.
    UnknownUser(String),
    /// Storage-level failure.
    Repo(RepoError),
}

impl ServiceError {
    /// Stable machine-readable code used in log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::AuthenticationRequired => "auth_required",
            Self::PermissionDenied { .. } => "permission_denied",
            Self::NotFound { .. } => "not_found",
            Self::DuplicateSlug { .. } => "duplicate_slug",
            Self::DuplicateEmail(_) => "duplicate_email",
            Self::Validation(_) => "validation_failed",
            Self::BootstrapClosed => "bootstrap_closed",
            Self::UnknownUser(_) => "unknown_user",
            Self::Repo(_) => "storage_failed",
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationRequired => write!(f, "authentication required"),
            Self::PermissionDenied { required } => {
                write!(f, "permission denied: requires {required} role")
            }
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::DuplicateSlug { kind, slug } => write!(
                f,
                "another {kind} already uses this {} (slug `{slug}`)",
                kind.source_field()
            ),
            Self::DuplicateEmail(email) => write!(f, "email already registered: {email}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::BootstrapClosed => write!(f, "an administrator account already exists"),
            Self::UnknownUser(email) => write!(f, "no user registered with email {email}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { entity, id } => Self::NotFound { entity, id },
            RepoError::DuplicateSlug { kind, slug } => Self::DuplicateSlug { kind, slug },
            RepoError::DuplicateEmail(email) => Self::DuplicateEmail(email),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

impl From<ValidationError> for ServiceError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Returns the caller's principal or `AuthenticationRequired`.
pub fn require_authenticated(ctx: &AuthContext) -> ServiceResult<&Principal> {
    ctx.principal().ok_or(ServiceError::AuthenticationRequired)
}

/// Returns the caller's principal when its role meets `required`.
pub fn require_role(ctx: &AuthContext, required: Role) -> ServiceResult<&Principal> {
    let principal = require_authenticated(ctx)?;
    if !principal.role.satisfies(required) {
        return Err(ServiceError::PermissionDenied { required });
    }
    Ok(principal)
}

/// Logs the outcome of one mutation and hands it back unchanged.
pub(crate) fn log_mutation<T>(
    event: &'static str,
    ctx: &AuthContext,
    outcome: ServiceResult<T>,
    detail: impl FnOnce(&T) -> String,
) -> ServiceResult<T> {
    let actor = ctx
        .principal()
        .map_or_else(|| "anonymous".to_string(), |p| p.user_id.to_string());
    match &outcome {
        Ok(value) => info!(
            "event={event} module=service status=ok actor={actor} {}",
            detail(value)
        ),
        Err(err) => warn!(
            "event={event} module=service status=error actor={actor} {}",
            error_fields(err)
        ),
    }
    outcome
}

/// Log fields for a failed mutation; e-mail bearing errors log the code only.
fn error_fields(err: &ServiceError) -> String {
    match err {
        ServiceError::DuplicateEmail(_)
        | ServiceError::UnknownUser(_)
        | ServiceError::Validation(ValidationError::InvalidEmail(_)) => {
            format!("error_code={}", err.code())
        }
        _ => format!("error_code={} error={err}", err.code()),
    }
}
