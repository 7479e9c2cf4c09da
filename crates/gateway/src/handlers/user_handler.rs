//! User handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::{ApiError, AppResult};
use domain::{CreateUser, UpdateUser, UserView};

use crate::extractors::{JsonBody, UserId};
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUser,
    responses(
        (status = 201, description = "User created", body = UserView),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 409, description = "Email already in use", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateUser>,
) -> AppResult<(StatusCode, Json<UserView>)> {
    let user = state.users.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users in creation order", body = Vec<UserView>),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserView>>> {
    Ok(Json(state.users.list_users().await?))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User found", body = UserView),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<Json<UserView>> {
    Ok(Json(state.users.get_user(id).await?))
}

/// Update user; absent or blank fields are left as they are
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUser,
    responses(
        (status = 200, description = "User updated", body = UserView),
        (status = 400, description = "Validation error", body = ApiError),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserId(id): UserId,
    JsonBody(payload): JsonBody<UpdateUser>,
) -> AppResult<Json<UserView>> {
    Ok(Json(state.users.update_user(id, payload).await?))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Malformed id", body = ApiError),
        (status = 404, description = "User not found", body = ApiError),
        (status = 500, description = "Storage failure", body = ApiError)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserId(id): UserId,
) -> AppResult<StatusCode> {
    state.users.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
