//! Route configuration.

use axum::{
    http::{Method, StatusCode, Uri},
    middleware,
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use common::ApiError;

use crate::handlers::{health_routes, user_routes};
use crate::middleware::stamp_error_path;
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/users", user_routes())
        .fallback(no_route)
        // Outermost so it sees every error body, including the fallback's
        .layer(middleware::from_fn(stamp_error_path))
        .with_state(state)
}

async fn no_route(method: Method, uri: Uri) -> ApiError {
    ApiError::new(
        StatusCode::NOT_FOUND,
        format!("No route for {} {}", method, uri.path()),
    )
}
