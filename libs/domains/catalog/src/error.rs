use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_helpers::errors::error_response;
use axum_helpers::{AppError, ErrorCode};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Message returned to clients when the product listing cannot be produced.
pub const LIST_FAILED_MESSAGE: &str = "Failed to fetch product list";

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A query parameter could not be normalized. Raised before any storage access.
    #[error("Invalid query parameter '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    /// The storage collaborator failed (connectivity, timeout, driver fault).
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CatalogError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        CatalogError::Validation {
            field,
            reason: reason.into(),
        }
    }

    fn error_code(&self) -> ErrorCode {
        match self {
            CatalogError::Validation { .. } | CatalogError::InvalidInput(_) => {
                ErrorCode::ValidationError
            }
            CatalogError::Storage(_) => ErrorCode::DatabaseError,
            CatalogError::NotFound(_) => ErrorCode::NotFound,
        }
    }

    /// Raw error payload echoed back in the `details` field of listing errors.
    fn details(&self) -> serde_json::Value {
        match self {
            CatalogError::Validation { field, reason } => json!({
                "kind": "ValidationError",
                "field": field,
                "reason": reason,
            }),
            CatalogError::Storage(reason) => json!({
                "kind": "StorageError",
                "reason": reason,
            }),
            other => json!({
                "kind": "Error",
                "reason": other.to_string(),
            }),
        }
    }
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation { .. } => AppError::BadRequest(err.to_string()),
            CatalogError::InvalidInput(msg) => AppError::BadRequest(msg),
            CatalogError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            CatalogError::Storage(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CatalogError {
    fn from(err: mongodb::error::Error) -> Self {
        CatalogError::Storage(err.to_string())
    }
}

/// Error wrapper for the listing endpoint.
///
/// Every failure of the filter path, validation or storage, is reported as
/// `400 Bad Request` with a fixed message and the raw error in `details`.
#[derive(Debug)]
pub struct ListingError(pub CatalogError);

impl From<CatalogError> for ListingError {
    fn from(err: CatalogError) -> Self {
        ListingError(err)
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        let code = self.0.error_code();
        match &self.0 {
            CatalogError::Storage(reason) => tracing::error!(
                error_code = code.code(),
                "Product listing failed in storage: {}",
                reason
            ),
            other => tracing::info!(
                error_code = code.code(),
                "Product listing rejected: {}",
                other
            ),
        }

        error_response(
            StatusCode::BAD_REQUEST,
            LIST_FAILED_MESSAGE.to_string(),
            code,
            Some(self.0.details()),
        )
    }
}
