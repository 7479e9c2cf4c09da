//! Fills in the `path` of error bodies.

use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use common::ApiError;

/// Rebuild error responses so their body carries the request path.
///
/// Handlers and extractors only know the error; the path is known here.
/// Error statuses produced by the router itself (405 and the like) arrive
/// without a body and get one built from their status line.
pub async fn stamp_error_path(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let response = next.run(req).await;

    let error = match response.extensions().get::<ApiError>() {
        Some(error) => error.clone(),
        None if is_bare_error(&response) => {
            let status = response.status();
            ApiError::new(status, status.canonical_reason().unwrap_or("Request failed"))
        }
        None => return response,
    };

    tracing::debug!(status = error.status, %path, "Request failed: {}", error.message);
    let mut stamped = error.with_path(path).into_response();
    if let Some(allow) = response.headers().get(header::ALLOW) {
        stamped.headers_mut().insert(header::ALLOW, allow.clone());
    }
    stamped
}

/// An error status whose handler did not write a typed body.
///
/// Responses with their own content type (the 503 health report) are kept.
fn is_bare_error(response: &Response) -> bool {
    let status: StatusCode = response.status();
    (status.is_client_error() || status.is_server_error())
        && !response.headers().contains_key(header::CONTENT_TYPE)
}
