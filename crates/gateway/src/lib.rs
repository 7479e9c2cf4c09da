//! HTTP Gateway Library
//!
//! This crate exposes the user service over a JSON REST API. It owns no
//! storage: the caller hands it a ready `UserService` and keeps the database
//! handle, so the handle can be closed once the server has drained.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use user_service_lib::UserService;

pub use crate::routes::create_router;
pub use crate::state::AppState;

/// Run the HTTP server until Ctrl-C is received.
pub async fn serve(
    host: &str,
    port: u16,
    users: Arc<dyn UserService>,
) -> Result<(), Box<dyn std::error::Error>> {
    let state = AppState::new(users);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running on http://{}", addr);
    info!("Swagger UI at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => {
            // Without a signal handler the server runs until killed
            warn!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
