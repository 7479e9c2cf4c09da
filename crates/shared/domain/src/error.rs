//! Domain-level errors.
//!
//! These errors represent business rule violations and domain logic failures.
//! They are independent of infrastructure concerns (HTTP, database).

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// A single structural defect in caller input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

/// Join field errors into the single-line form shown to clients.
pub fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(FieldError::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Input is structurally malformed
    #[error("{}", describe(.0))]
    Validation(Vec<FieldError>),

    /// Email already belongs to another user
    #[error("User with email {0} already exists")]
    Conflict(String),

    /// No user with this id
    #[error("User with id {0} not found")]
    NotFound(i32),
}

impl DomainError {
    /// Create a validation error for one field
    pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        DomainError::Validation(vec![FieldError::new(field, reason)])
    }

    /// Create a conflict error for an email value
    pub fn conflict(email: impl Into<String>) -> Self {
        DomainError::Conflict(email.into())
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
