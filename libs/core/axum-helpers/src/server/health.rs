//! Liveness (`/health`) and readiness helpers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use core_config::AppInfo;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

/// `/health` body: `{"status":"UP","name":..,"version":..}`
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub name: String,
    pub version: String,
}

/// One readiness probe; `Err` carries the reason, which is only logged
pub type HealthCheckFuture<'a> = Pin<Box<dyn Future<Output = Result<(), String>> + Send + 'a>>;

/// Readiness body: overall status plus one entry per named check
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ReadinessReport {
    pub status: String,
    #[serde(flatten)]
    pub checks: BTreeMap<String, String>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

impl IntoResponse for ReadinessReport {
    fn into_response(self) -> Response {
        let status = if self.is_ready() {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        };
        (status, Json(self)).into_response()
    }
}

/// Run every check concurrently.
///
/// Answers `200 {"status":"ready", name: "connected", ..}`, or `503` with
/// `"not ready"` and `"disconnected"` for each failed check.
///
/// ```ignore
/// let checks: Vec<(&str, HealthCheckFuture<'_>)> = vec![(
///     "mongodb",
///     Box::pin(async { check_health(&client).await.map_err(|e| e.to_string()) }),
/// )];
/// run_health_checks(checks).await
/// ```
pub async fn run_health_checks(checks: Vec<(&str, HealthCheckFuture<'_>)>) -> ReadinessReport {
    let (names, futures): (Vec<&str>, Vec<_>) = checks.into_iter().unzip();
    let results = join_all(futures).await;

    let mut ready = true;
    let checks = names
        .into_iter()
        .zip(results)
        .map(|(name, result)| {
            let state = match result {
                Ok(()) => "connected",
                Err(reason) => {
                    tracing::error!(check = name, "Readiness check failed: {}", reason);
                    ready = false;
                    "disconnected"
                }
            };
            (name.to_string(), state.to_string())
        })
        .collect();

    ReadinessReport {
        status: if ready { "ready" } else { "not ready" }.to_string(),
        checks,
    }
}

/// Always `200` while the process is up
pub async fn health_handler(State(app): State<AppInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        name: app.name.to_string(),
        version: app.version.to_string(),
    })
}

/// `GET /health` reporting `app_info`
///
/// ```ignore
/// let app = router.merge(health_router(app_info!()));
/// ```
pub fn health_router(app_info: AppInfo) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(app_info)
}
