//! Error codes carried in every [`ErrorResponse`](super::ErrorResponse).
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::DatabaseError;
//! assert_eq!(code.as_str(), "DATABASE_ERROR");
//! assert_eq!(code.code(), 2003);
//! ```

use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Machine-readable error identifier, serialized as `SCREAMING_SNAKE_CASE`.
///
/// Numeric ranges: 1xxx request problems, 2xxx storage.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    InvalidUuid,
    JsonExtraction,
    NotFound,
    InternalError,
    MethodNotAllowed,
    /// Query or connection failure reported by MongoDB
    DatabaseError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }

    /// Integer code logged as the `error_code` field
    pub fn code(&self) -> i32 {
        self.entry().0
    }

    /// Message used when the caller has nothing more specific
    pub fn default_message(&self) -> &'static str {
        self.entry().1
    }

    fn entry(&self) -> (i32, &'static str) {
        match self {
            Self::ValidationError => (1001, "Request validation failed"),
            Self::InvalidUuid => (1002, "Invalid UUID format"),
            Self::JsonExtraction => (1003, "Failed to parse request body"),
            Self::NotFound => (1004, "Resource not found"),
            Self::InternalError => (1005, "An internal server error occurred"),
            Self::MethodNotAllowed => (1012, "The HTTP method is not allowed for this resource"),
            Self::DatabaseError => (2003, "Database error occurred"),
        }
    }
}
