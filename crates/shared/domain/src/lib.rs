//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the `User` entity, its transfer shapes and the structural validation
//! rules applied to them before anything touches storage.

pub mod constants;
pub mod error;
pub mod timestamp;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult, FieldError};
pub use user::{CreateUser, NewUser, UpdateUser, User, UserChanges, UserView};
