//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::handlers::health_handler::HealthResponse;
use common::ApiError;
use domain::{CreateUser, UpdateUser, UserView};

/// API documentation struct.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::user_handler::create_user,
        crate::handlers::user_handler::list_users,
        crate::handlers::user_handler::get_user,
        crate::handlers::user_handler::update_user,
        crate::handlers::user_handler::delete_user,
        crate::handlers::health_handler::health_check,
    ),
    components(
        schemas(
            CreateUser,
            UpdateUser,
            UserView,
            ApiError,
            HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User management endpoints"),
        (name = "Health", description = "Liveness and database connectivity"),
    )
)]
pub struct ApiDoc;
