//! Structural validation of caller input.
//!
//! Every check here looks only at the input itself. Checks that need stored
//! state (email uniqueness, id existence) belong to the service and always run
//! after these.

use chrono::{DateTime, Utc};
use validator::ValidateEmail;

use crate::constants::{
    FIELD_AGE, FIELD_EMAIL, FIELD_ID, FIELD_NAME, REASON_BLANK, REASON_EMAIL_SHAPE,
    REASON_INVALID_ID, REASON_MISSING, REASON_NOT_A_NUMBER,
};
use crate::error::{DomainError, DomainResult, FieldError};
use crate::user::{CreateUser, NewUser, UpdateUser, UserChanges};

/// True for empty or whitespace-only text.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Basic email shape check.
pub fn is_email(value: &str) -> bool {
    value.validate_email()
}

fn check_name(name: &str, errors: &mut Vec<FieldError>) {
    if is_blank(name) {
        errors.push(FieldError::new(FIELD_NAME, REASON_BLANK));
    }
}

fn check_email(email: &str, errors: &mut Vec<FieldError>) {
    if is_blank(email) {
        errors.push(FieldError::new(FIELD_EMAIL, REASON_BLANK));
    } else if !is_email(email) {
        errors.push(FieldError::new(FIELD_EMAIL, REASON_EMAIL_SHAPE));
    }
}

fn finish(errors: Vec<FieldError>) -> DomainResult<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(DomainError::Validation(errors))
    }
}

/// Fold a blank optional string into `None`.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !is_blank(v))
}

impl CreateUser {
    /// Check every field, reporting all defects at once.
    pub fn validate(&self) -> DomainResult<()> {
        let mut errors = Vec::new();
        check_name(&self.name, &mut errors);
        check_email(&self.email, &mut errors);
        if self.age.is_none() {
            errors.push(FieldError::new(FIELD_AGE, REASON_MISSING));
        }
        finish(errors)
    }

    /// Validate and convert into an entity ready to be saved.
    ///
    /// `created_at` keeps the caller's value when given, otherwise `now`.
    pub fn into_new_user(self, now: DateTime<Utc>) -> DomainResult<NewUser> {
        self.validate()?;
        let age = self
            .age
            .ok_or_else(|| DomainError::field(FIELD_AGE, REASON_MISSING))?;

        Ok(NewUser {
            name: self.name,
            email: self.email,
            age,
            created_at: self.created_at.unwrap_or(now),
        })
    }
}

impl UpdateUser {
    /// Drop blank fields and check whatever is left.
    pub fn into_changes(self) -> DomainResult<UserChanges> {
        let changes = UserChanges {
            name: present(self.name),
            email: present(self.email),
            age: self.age,
        };

        let mut errors = Vec::new();
        if let Some(email) = &changes.email {
            check_email(email, &mut errors);
        }
        finish(errors)?;

        Ok(changes)
    }
}

/// Parse a user id typed by a person or taken from a URL segment.
pub fn parse_id(raw: &str) -> DomainResult<i32> {
    match raw.trim().parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::field(FIELD_ID, REASON_INVALID_ID)),
    }
}

/// Parse an age typed as text.
pub fn parse_age(raw: &str) -> DomainResult<i32> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DomainError::field(FIELD_AGE, REASON_NOT_A_NUMBER))
}
