//! Request extractors whose rejections use the shared [`crate::ErrorResponse`] body.
//!
//! - [`UuidPath`]: `/{id}` segment parsed as a UUID (400 `INVALID_UUID`)
//! - [`ValidatedJson`]: JSON body checked with `validator` (400 `VALIDATION_ERROR`)

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::ValidatedJson;
