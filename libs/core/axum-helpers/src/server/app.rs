use super::shutdown::{ShutdownCoordinator, shutdown_signal};
use crate::errors::handlers::{method_not_allowed, not_found};
use crate::http::cors::cors_layer_from_origins;
use crate::http::security::security_headers;
use axum::{Router, middleware};
use core_config::{env_or_default, server::ServerConfig};
use std::io;
use std::time::Duration;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};

/// Starts the Axum server with graceful shutdown.
///
/// # Errors
/// Returns an error if the TCP listener fails to bind or the server fails
/// while running.
pub async fn create_app(router: Router, server_config: &ServerConfig) -> io::Result<()> {
    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;

    info!("Server starting on {}", listener.local_addr()?);
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        })?;

    Ok(())
}

/// Creates a configured Axum router with the common middleware stack.
///
/// This function sets up:
/// - API routes nested under `/api`
/// - Tracing, security headers, CORS and response compression
/// - JSON 404 / 405 fallbacks
///
/// Health endpoints (`/health`, `/ready`) are merged by the app.
///
/// # CORS Configuration
///
/// `CORS_ALLOWED_ORIGIN` holds comma-separated allowed origins. It defaults
/// to `*`, which allows any origin.
///
/// - Development: `CORS_ALLOWED_ORIGIN=http://localhost:3000,http://localhost:5173`
/// - Production: `CORS_ALLOWED_ORIGIN=https://shop.example.com`
///
/// # Errors
/// Returns `InvalidInput` if `CORS_ALLOWED_ORIGIN` is empty or malformed.
///
/// # Example
/// ```ignore
/// let api_routes = Router::new().nest("/v1/products", handlers::router(service));
/// let router = create_router(api_routes).await?;
/// ```
pub async fn create_router(apis: Router) -> io::Result<Router> {
    let origins = env_or_default("CORS_ALLOWED_ORIGIN", "*");
    let cors_layer = cors_layer_from_origins(&origins)?;

    Ok(with_middleware(apis, cors_layer))
}

fn with_middleware(apis: Router, cors_layer: CorsLayer) -> Router {
    Router::new()
        .nest("/api", apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer)
        // gzip, br, deflate, zstd depending on Accept-Encoding
        .layer(CompressionLayer::new())
}

/// Production server with coordinated shutdown and cleanup.
///
/// On SIGINT/SIGTERM the server stops accepting connections, drains
/// in-flight requests and runs `cleanup` (bounded by `shutdown_timeout`).
///
/// # Example
/// ```ignore
/// let cleanup = async move {
///     client.shutdown().await;
/// };
///
/// create_production_app(router, &config, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::new();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    let cleanup_trigger = coordinator.clone();
    let cleanup_handle = tokio::spawn(async move {
        cleanup_trigger.triggered().await;

        info!(?shutdown_timeout, "Running cleanup");
        if tokio::time::timeout(shutdown_timeout, cleanup).await.is_err() {
            tracing::warn!(?shutdown_timeout, "Cleanup timed out, forcing shutdown");
        } else {
            info!("Cleanup completed");
        }
    });

    let drain = coordinator.clone();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { drain.triggered().await })
        .await
        .inspect_err(|e| tracing::error!("Server encountered an error: {:?}", e));

    // A serve error never saw a signal; release the cleanup task ourselves
    coordinator.shutdown();
    cleanup_handle.await.ok();

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::cors::create_permissive_cors_layer;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn router() -> Router {
        let apis = Router::new().route("/ping", get(|| async { "pong" }));
        with_middleware(apis, create_permissive_cors_layer())
    }

    #[tokio::test]
    async fn test_routes_are_nested_under_api() {
        let response = router()
            .oneshot(Request::builder().uri("/api/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_unknown_route_returns_json_404() {
        let response = router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "NOT_FOUND");
        assert_eq!(json["code"], 1004);
    }

    #[test]
    fn test_create_router_rejects_empty_cors_origins() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some(" , "), || {
            let result = tokio_test::block_on(create_router(Router::new()));
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_create_router_defaults_to_any_origin() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let result = tokio_test::block_on(create_router(Router::new()));
            assert!(result.is_ok());
        });
    }
}
