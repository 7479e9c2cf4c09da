//! User admin binary - HTTP server, console menu and migrations in one CLI.
//!
//! The process owns the database handle: it is opened once here, shared with
//! whichever front end runs, and closed after that front end returns.

use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::DatabaseConfig;
use user_service_lib::infra::Database;
use user_service_lib::{UserManager, UserService, UserStore};

type BoxError = Box<dyn std::error::Error>;

#[derive(Parser, Debug)]
#[command(name = "user-admin")]
#[command(author, version, about = "User management service", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Database connection URL
    #[arg(long, global = true, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "0.0.0.0", env = "SERVER_HOST")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value = "3000", env = "SERVER_PORT")]
        port: u16,
    },
    /// Run the interactive menu on this terminal
    Console,
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum MigrateAction {
    /// Run pending migrations
    Up,
    /// Rollback last migration
    Down,
    /// Show migration status
    Status,
    /// Reset database and run all migrations
    Fresh,
}

impl From<MigrateAction> for user_service_lib::MigrateAction {
    fn from(action: MigrateAction) -> Self {
        match action {
            MigrateAction::Up => Self::Up,
            MigrateAction::Down => Self::Down,
            MigrateAction::Status => Self::Status,
            MigrateAction::Fresh => Self::Fresh,
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = DatabaseConfig::from_env();
    if let Some(url) = cli.database_url {
        config = config.with_url(url);
    }
    tracing::debug!(?config, "Configuration loaded");

    let result = match cli.command {
        Commands::Serve { host, port } => serve(&config, &host, port).await,
        Commands::Console => console(&config).await,
        Commands::Migrate { action } => migrate(&config, action).await,
    };

    if let Err(e) = result {
        error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing subscriber.
///
/// Logs go to stderr so they never interleave with the console menu.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        tracing_subscriber::EnvFilter::new("debug")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,tower_http=debug".into())
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Open the database and build the service on top of it.
async fn connect(config: &DatabaseConfig) -> Result<(Database, Arc<dyn UserService>), BoxError> {
    let db = Database::connect(config).await?;
    let store = Arc::new(UserStore::new(db.get_connection()));
    let users: Arc<dyn UserService> = Arc::new(UserManager::new(store));
    Ok((db, users))
}

async fn serve(config: &DatabaseConfig, host: &str, port: u16) -> Result<(), BoxError> {
    info!("Starting server...");
    let (db, users) = connect(config).await?;

    let served = gateway_lib::serve(host, port, users).await;
    keep_outcome(served, db.close().await)
}

async fn console(config: &DatabaseConfig) -> Result<(), BoxError> {
    let (db, users) = connect(config).await?;

    let ran = console_lib::run_stdio(users).await.map_err(BoxError::from);
    keep_outcome(ran, db.close().await)
}

/// The front end's outcome wins over a failure to close the pool afterwards;
/// the close failure is only logged.
fn keep_outcome<T, E: std::fmt::Display>(
    outcome: Result<T, BoxError>,
    closed: Result<(), E>,
) -> Result<T, BoxError> {
    if let Err(e) = closed {
        warn!("Failed to close database: {}", e);
    }
    outcome
}

async fn migrate(config: &DatabaseConfig, action: MigrateAction) -> Result<(), BoxError> {
    info!("Running migration command...");
    let action = user_service_lib::MigrateAction::from(action);
    let status = user_service_lib::run_migrations(config, action).await?;

    for migration in status {
        println!("{}", migration);
    }
    Ok(())
}
