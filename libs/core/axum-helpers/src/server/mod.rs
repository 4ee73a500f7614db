//! Server infrastructure module.
//!
//! - Router assembly with the shared middleware stack
//! - Health and readiness endpoints
//! - Graceful shutdown coordination
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_production_app, create_router, health_router};
//! use core_config::app_info;
//!
//! let router = create_router(api_routes).await?;
//! let app = router.merge(health_router(app_info!()));
//!
//! create_production_app(app, &config.server, Duration::from_secs(30), cleanup).await?;
//! ```

pub mod app;
pub mod health;
pub mod shutdown;

pub use app::{create_app, create_production_app, create_router};
pub use health::{
    HealthCheckFuture, HealthResponse, ReadinessReport, health_router, run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
