pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "code": 1001,
///   "error": "VALIDATION_ERROR",
///   "message": "Failed to fetch product list",
///   "details": { "kind": "ValidationError", "field": "page", "reason": "..." }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Request-level failures shared by all handlers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON body rejected: {0}")]
    Json(#[from] JsonRejection),

    #[error("Path rejected: {0}")]
    Path(#[from] PathRejection),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(#[from] uuid::Error),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The message is logged but never sent to the client
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Json(rejection) => rejection.status(),
            AppError::Path(rejection) => rejection.status(),
            AppError::InvalidUuid(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> ErrorCode {
        match self {
            AppError::Json(_) => ErrorCode::JsonExtraction,
            AppError::Path(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                ErrorCode::ValidationError
            }
            AppError::InvalidUuid(_) => ErrorCode::InvalidUuid,
            AppError::NotFound(_) => ErrorCode::NotFound,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Json(rejection) => rejection.body_text(),
            AppError::Path(rejection) => rejection.body_text(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) => msg.clone(),
            other => other.error_code().default_message().to_string(),
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::Validation(errors) => Some(validation_details(errors)),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(error_code = code.code(), "{}", self);
        } else {
            tracing::info!(error_code = code.code(), "{}", self);
        }

        error_response(status, self.client_message(), code, self.details())
    }
}

/// Render validator errors as `{ field: [{code, message, params}] }`.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let entries: Vec<Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(entries))
        })
        .collect();

    Value::Object(fields)
}

/// Build a JSON error response from its parts.
///
/// Used directly when the message differs from what [`AppError`] would pick,
/// e.g. the fixed message of the product listing.
pub fn error_response(
    status: StatusCode,
    message: String,
    error_code: ErrorCode,
    details: Option<Value>,
) -> Response {
    let body = ErrorResponse {
        code: error_code.code(),
        error: error_code.as_str().to_string(),
        message,
        details,
    };

    (status, Json(body)).into_response()
}
