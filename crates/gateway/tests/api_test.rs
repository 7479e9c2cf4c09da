//! Integration tests for API endpoints.
//!
//! The router is driven in-process with `oneshot`, backed by the in-memory
//! store, so no database or network is needed.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{AppError, AppResult};
use domain::{CreateUser, UpdateUser, UserView};
use gateway_lib::{create_router, AppState};
use user_service_lib::{InMemoryUserStore, UserManager, UserService};

// =============================================================================
// Helpers
// =============================================================================

fn app() -> Router {
    let users = UserManager::new(Arc::new(InMemoryUserStore::new()));
    create_router(AppState::new(Arc::new(users)))
}

/// Service whose storage is always unreachable
struct BrokenStorage;

#[async_trait]
impl UserService for BrokenStorage {
    async fn create_user(&self, _request: CreateUser) -> AppResult<UserView> {
        Err(AppError::storage("connection refused"))
    }

    async fn get_user(&self, _id: i32) -> AppResult<UserView> {
        Err(AppError::storage("connection refused"))
    }

    async fn list_users(&self) -> AppResult<Vec<UserView>> {
        Err(AppError::storage("connection refused"))
    }

    async fn update_user(&self, _id: i32, _request: UpdateUser) -> AppResult<UserView> {
        Err(AppError::storage("connection refused"))
    }

    async fn delete_user(&self, _id: i32) -> AppResult<()> {
        Err(AppError::storage("connection refused"))
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::storage("connection refused"))
    }
}

fn broken_app() -> Router {
    create_router(AppState::new(Arc::new(BrokenStorage)))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_ann(app: &Router) -> Value {
    let response = send(
        app,
        "POST",
        "/api/users",
        Some(json!({"name": "Ann", "email": "ann@x.com", "age": 30})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_201_with_view() {
    let app = app();
    let body = create_ann(&app).await;

    assert_eq!(body["id"], 1);
    assert_eq!(body["name"], "Ann");
    assert_eq!(body["email"], "ann@x.com");
    assert_eq!(body["age"], 30);
    assert!(body["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_keeps_supplied_created_at() {
    let app = app();
    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "age": 30,
            "createdAt": "2024-01-01 10:00:00"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = json_body(response).await;
    assert_eq!(body["createdAt"], "2024-01-01 10:00:00");

    let fetched = json_body(send(&app, "GET", "/api/users/1", None).await).await;
    assert_eq!(fetched["createdAt"], "2024-01-01 10:00:00");
}

#[tokio::test]
async fn test_created_at_is_rendered_without_fraction() {
    let app = app();
    let body = create_ann(&app).await;

    let created_at = body["createdAt"].as_str().unwrap();
    assert!(domain::timestamp::parse(created_at).is_ok(), "got {created_at}");
}

#[tokio::test]
async fn test_rfc3339_created_at_returns_400() {
    let app = app();
    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({
            "name": "Ann",
            "email": "ann@x.com",
            "age": 30,
            "createdAt": "2024-01-01T10:00:00Z"
        })),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("body:"));
}

#[tokio::test]
async fn test_create_duplicate_email_returns_409() {
    let app = app();
    create_ann(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Other", "email": "ann@x.com", "age": 41})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["status"], 409);
    assert_eq!(body["message"], "User with email ann@x.com already exists");
    assert_eq!(body["path"], "/api/users");
}

#[tokio::test]
async fn test_create_blank_name_returns_400() {
    let app = app();
    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "", "email": "a@x.com", "age": 1})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["status"], 400);
    assert_eq!(body["message"], "name: must not be blank");
    assert_eq!(body["path"], "/api/users");
}

#[tokio::test]
async fn test_malformed_email_wins_over_conflict() {
    let app = app();
    create_ann(&app).await;

    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Ann", "email": "ann@", "age": 30})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("email:"));
}

#[tokio::test]
async fn test_non_numeric_age_returns_400() {
    let app = app();
    let response = send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Ann", "email": "ann@x.com", "age": "thirty"})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert!(body["message"].as_str().unwrap().starts_with("body:"));
    assert_eq!(body["path"], "/api/users");
}

#[tokio::test]
async fn test_unparsable_json_returns_400() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_get_missing_user_returns_404() {
    let app = app();
    let response = send(&app, "GET", "/api/users/999", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(
        body,
        json!({
            "status": 404,
            "message": "User with id 999 not found",
            "path": "/api/users/999"
        })
    );
}

#[tokio::test]
async fn test_get_returns_created_user() {
    let app = app();
    let created = create_ann(&app).await;

    let response = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, created);
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let app = app();
    let response = send(&app, "GET", "/api/users/abc", None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["message"], "id: must be a positive integer");
    assert_eq!(body["path"], "/api/users/abc");
}

#[tokio::test]
async fn test_list_in_creation_order() {
    let app = app();
    let empty = send(&app, "GET", "/api/users", None).await;
    assert_eq!(empty.status(), StatusCode::OK);
    assert_eq!(json_body(empty).await, json!([]));

    create_ann(&app).await;
    send(
        &app,
        "POST",
        "/api/users",
        Some(json!({"name": "Bob", "email": "bob@x.com", "age": 25})),
    )
    .await;

    let body = json_body(send(&app, "GET", "/api/users", None).await).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Ann", "Bob"]);
}

// =============================================================================
// Update
// =============================================================================

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let app = app();
    let created = create_ann(&app).await;

    let response = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({"name": "Bob", "email": ""})),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["name"], "Bob");
    assert_eq!(body["email"], "ann@x.com");
    assert_eq!(body["age"], 30);
    assert_eq!(body["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_missing_user_returns_404() {
    let app = app();
    let response = send(&app, "PUT", "/api/users/5", Some(json!({"name": "Bob"}))).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["path"], "/api/users/5");
}

#[tokio::test]
async fn test_update_malformed_email_returns_400() {
    let app = app();
    create_ann(&app).await;

    let response = send(
        &app,
        "PUT",
        "/api/users/1",
        Some(json!({"email": "nope"})),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let stored = json_body(send(&app, "GET", "/api/users/1", None).await).await;
    assert_eq!(stored["email"], "ann@x.com");
}

// =============================================================================
// Delete
// =============================================================================

#[tokio::test]
async fn test_delete_then_delete_again() {
    let app = app();
    create_ann(&app).await;

    let first = send(&app, "DELETE", "/api/users/1", None).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    let bytes = to_bytes(first.into_body(), usize::MAX).await.unwrap();
    assert!(bytes.is_empty());

    let second = send(&app, "DELETE", "/api/users/1", None).await;
    assert_eq!(second.status(), StatusCode::NOT_FOUND);

    let gone = send(&app, "GET", "/api/users/1", None).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}

// =============================================================================
// Storage failures, health, docs and fallback
// =============================================================================

#[tokio::test]
async fn test_storage_failure_returns_500_without_details() {
    let app = broken_app();
    let response = send(&app, "GET", "/api/users", None).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["status"], 500);
    assert_eq!(body["message"], "A database error occurred");
    assert_eq!(body["path"], "/api/users");
}

#[tokio::test]
async fn test_health_reports_database_state() {
    let up = send(&app(), "GET", "/health", None).await;
    assert_eq!(up.status(), StatusCode::OK);
    assert_eq!(
        json_body(up).await,
        json!({"status": "healthy", "database": "up"})
    );

    let down = send(&broken_app(), "GET", "/health", None).await;
    assert_eq!(down.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(json_body(down).await["database"], "down");
}

#[tokio::test]
async fn test_openapi_document_lists_user_paths() {
    let response = send(&app(), "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let doc = json_body(response).await;
    assert!(doc["paths"]["/api/users"].is_object());
    assert!(doc["paths"]["/api/users/{id}"].is_object());
}

#[tokio::test]
async fn test_unsupported_method_uses_error_body() {
    let app = app();

    let response = send(&app, "PATCH", "/api/users/1", Some(json!({"name": "Bob"}))).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(
        json_body(response).await,
        json!({
            "status": 405,
            "message": "Method Not Allowed",
            "path": "/api/users/1"
        })
    );

    let response = send(&app, "DELETE", "/api/users", None).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let body = json_body(response).await;
    assert_eq!(body["status"], 405);
    assert_eq!(body["path"], "/api/users");
}

#[tokio::test]
async fn test_unknown_route_uses_error_body() {
    let response = send(&app(), "GET", "/nowhere", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["path"], "/nowhere");
}
