//! Fallback handlers producing the error envelope.

use axum::extract::OriginalUri;
use axum::http::Method;
use serde_json::json;

use crate::error::AppError;

/// Answers verbs that are not mapped on a known path with `405 Method Not Allowed`.
pub async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> AppError {
    AppError::method_not_allowed(
        format!("Method {} is not allowed on {}", method, uri.path()),
        json!({ "method": method.as_str(), "path": uri.path() }),
    )
}

/// Answers unknown paths with `404 Not Found`.
pub async fn resource_not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::not_found("Resource not found", json!({ "path": uri.path() }))
}
