//! Administrator account model.
//!
//! # Invariants
//! - `email` is stored trimmed and lowercase, and is unique. Drafts built
//!   without `NewUser::new` are normalized on insert.

use crate::model::principal::Role;
use crate::model::validation::{require_text, ValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type UserId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub display_name: String,
    pub role: Role,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub display_name: String,
    pub role: Role,
}

impl NewUser {
    pub fn new(email: impl Into<String>, display_name: impl Into<String>, role: Role) -> Self {
        Self {
            email: normalize_email(&email.into()),
            display_name: display_name.into(),
            role,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&normalize_email(&self.email))?;
        require_text("display_name", &self.display_name)
    }
}

/// Normalizes one e-mail address for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn validate_email(email: &str) -> Result<(), ValidationError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail(email.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::NewUser;
    use crate::model::principal::Role;
    use crate::model::validation::ValidationError;

    #[test]
    fn email_is_normalized_on_construction() {
        let user = NewUser::new("  Keeper@Example.ORG ", "Keeper", Role::Editor);
        assert_eq!(user.email, "keeper@example.org");
        assert!(user.validate().is_ok());
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["keeper", "@example.org", "keeper@", "a@b@c", "kee per@x.org"] {
            let user = NewUser::new(email, "Keeper", Role::Editor);
            assert!(
                matches!(user.validate(), Err(ValidationError::InvalidEmail(_))),
                "accepted `{email}`"
            );
        }
    }
}
