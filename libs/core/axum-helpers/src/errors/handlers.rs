//! Router-level fallbacks answering with an [`ErrorResponse`](super::ErrorResponse)

use axum::{http::StatusCode, response::Response};

use super::{ErrorCode, error_response};

pub async fn not_found() -> Response {
    error_response(
        StatusCode::NOT_FOUND,
        "The requested resource was not found".to_string(),
        ErrorCode::NotFound,
        None,
    )
}

pub async fn method_not_allowed() -> Response {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        ErrorCode::MethodNotAllowed.default_message().to_string(),
        ErrorCode::MethodNotAllowed,
        None,
    )
}
