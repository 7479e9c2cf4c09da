//! Database handle and schema management.

use std::collections::HashSet;
use std::fmt;

use common::DatabaseConfig;
use sea_orm::{Database as SeaDatabase, DatabaseConnection, DbErr, EntityTrait};
use sea_orm_migration::{seaql_migrations, MigratorTrait};

use super::migrations::Migrator;
use crate::MigrateAction;

/// Whether one known migration has been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    pub name: String,
    pub applied: bool,
}

impl fmt::Display for MigrationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.applied { "applied" } else { "pending" };
        write!(f, "{}: {}", self.name, state)
    }
}

/// Owned connection pool.
///
/// Opened once by the process entry point and closed on clean shutdown.
/// Stores get clones of the pool; they fail once it is closed.
pub struct Database {
    connection: DatabaseConnection,
}

impl Database {
    /// Open the pool and bring the schema up to date.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let db = Self::open(config).await?;
        Migrator::up(&db.connection, None).await?;
        tracing::info!("Database connected and migrations applied");
        Ok(db)
    }

    /// Open the pool and leave the schema alone.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let connection = SeaDatabase::connect(config.connect_options()).await?;
        Ok(Self { connection })
    }

    /// A pool handle for a store.
    pub fn get_connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    /// Run one migration action and report the resulting state.
    pub async fn migrate(&self, action: MigrateAction) -> Result<Vec<MigrationState>, DbErr> {
        match action {
            MigrateAction::Up => Migrator::up(&self.connection, None).await?,
            MigrateAction::Down => Migrator::down(&self.connection, Some(1)).await?,
            MigrateAction::Fresh => {
                tracing::warn!("Dropping all tables and re-running migrations");
                Migrator::fresh(&self.connection).await?
            }
            MigrateAction::Status => {}
        }
        self.migration_status().await
    }

    /// Every known migration in order, with its applied flag.
    pub async fn migration_status(&self) -> Result<Vec<MigrationState>, DbErr> {
        // Creates the bookkeeping table when no migration has run yet
        Migrator::install(&self.connection).await?;
        let applied: HashSet<String> = seaql_migrations::Entity::find()
            .all(&self.connection)
            .await?
            .into_iter()
            .map(|row| row.version)
            .collect();

        Ok(Migrator::migrations()
            .iter()
            .map(|m| MigrationState {
                name: m.name().to_string(),
                applied: applied.contains(m.name()),
            })
            .collect())
    }

    /// Close the pool.
    pub async fn close(self) -> Result<(), DbErr> {
        self.connection.close().await?;
        tracing::info!("Database connection closed");
        Ok(())
    }
}
