use axum::http::{HeaderValue, Method};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Creates a CORS layer for a fixed list of origins.
///
/// Configured with:
/// - Methods: GET, POST, OPTIONS
/// - Headers: Content-Type, Accept
/// - 1 hour max age
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ])
        .max_age(Duration::from_secs(3600))
}

/// Creates a permissive CORS layer that allows any origin.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

/// Build the CORS layer from a `CORS_ALLOWED_ORIGIN` value.
///
/// `*` yields a permissive layer; otherwise the value is a comma-separated
/// list of origins.
///
/// # Errors
/// Returns `InvalidInput` when the list is empty or an origin is not a valid
/// header value.
pub fn cors_layer_from_origins(origins: &str) -> io::Result<CorsLayer> {
    if origins.trim() == "*" {
        tracing::warn!("CORS configured to allow any origin");
        return Ok(create_permissive_cors_layer());
    }

    let allowed_origins: Vec<HeaderValue> = origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    if allowed_origins.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "CORS_ALLOWED_ORIGIN cannot be empty",
        ));
    }

    tracing::info!("CORS configured with allowed origins: {}", origins);
    Ok(create_cors_layer(allowed_origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_is_permissive() {
        assert!(cors_layer_from_origins("*").is_ok());
    }

    #[test]
    fn test_origin_list() {
        assert!(cors_layer_from_origins("http://localhost:3000, https://shop.example.com").is_ok());
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let err = cors_layer_from_origins(" , ").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        assert!(cors_layer_from_origins("http://bad\norigin").is_err());
    }
}
