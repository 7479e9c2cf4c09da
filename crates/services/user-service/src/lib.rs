//! User Service Library
//!
//! This crate provides user management: the persistence gateway over SeaORM
//! (plus an in-memory stand-in), the database handle and its migrations, and
//! the application service that validates input and classifies failures.
//! Transport layers (HTTP, console) live in their own crates.

pub mod infra;
pub mod repository;
pub mod service;

use common::DatabaseConfig;
use sea_orm::DbErr;
use tracing::{info, warn};

use crate::infra::{Database, MigrationState};

pub use repository::{InMemoryUserStore, UserRepository, UserStore};
pub use service::{UserManager, UserService};

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Open the database, run one migration action and close it again.
///
/// Returns the state of every known migration after the action.
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> Result<Vec<MigrationState>, DbErr> {
    let db = Database::open(config).await?;
    let result = db.migrate(action).await;
    if result.is_ok() {
        info!(?action, "Migration command finished");
    }

    // A close failure must not hide the migration outcome
    if let Err(e) = db.close().await {
        warn!("Failed to close database: {}", e);
    }
    result
}
