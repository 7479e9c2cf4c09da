//! Common utilities shared across the workspace.
//!
//! This crate provides:
//! - The closed error taxonomy and its HTTP mapping
//! - Configuration structures

pub mod config;
pub mod error;

pub use config::DatabaseConfig;
pub use error::{ApiError, AppError, AppResult, OptionExt};
