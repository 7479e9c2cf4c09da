//! Unified error handling.
//!
//! Every service operation fails with exactly one [`AppError`] kind. The HTTP
//! boundary maps each kind to a fixed status code and renders the same
//! `{ status, message, path }` body for all of them.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::error::describe;
use domain::{DomainError, FieldError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types. The set is closed.
#[derive(Error, Debug)]
pub enum AppError {
    /// Input is structurally malformed
    #[error("{}", describe(.0))]
    Validation(Vec<FieldError>),

    /// Create would break email uniqueness
    #[error("User with email {0} already exists")]
    Conflict(String),

    /// No user with this id
    #[error("User with id {0} not found")]
    NotFound(i32),

    /// The persistence gateway failed; never classified further
    #[error("Database error")]
    Storage(#[from] sea_orm::DbErr),
}

/// Error body returned for every 4xx/5xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ApiError {
    /// HTTP status code
    #[cfg_attr(feature = "openapi", schema(example = 404))]
    pub status: u16,
    /// Human readable description
    #[cfg_attr(feature = "openapi", schema(example = "User with id 999 not found"))]
    pub message: String,
    /// Request path that produced the error
    #[cfg_attr(feature = "openapi", schema(example = "/api/users/999"))]
    pub path: String,
}

impl ApiError {
    /// Build a body without a path; the gateway fills it in per request.
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            path: String::new(),
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides storage details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Storage(e) => {
                tracing::error!("Database error: {:?}", e);
                "A database error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Field errors carried by a validation failure
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            AppError::Validation(errors) => errors,
            _ => &[],
        }
    }

    pub fn to_api_error(&self) -> ApiError {
        ApiError::new(self.status(), self.user_message())
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = (self.status_code(), Json(&self)).into_response();
        // Kept so the gateway can stamp the request path onto the body.
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error().into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(errors) => AppError::Validation(errors),
            DomainError::Conflict(email) => AppError::Conflict(email),
            DomainError::NotFound(id) => AppError::NotFound(id),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self, id: i32) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, id: i32) -> AppResult<T> {
        self.ok_or(AppError::NotFound(id))
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Validation(vec![FieldError::new(field, reason)])
    }

    pub fn conflict(email: impl Into<String>) -> Self {
        AppError::Conflict(email.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        AppError::Storage(sea_orm::DbErr::Custom(msg.into()))
    }
}
