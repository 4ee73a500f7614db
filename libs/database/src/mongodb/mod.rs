//! MongoDB connection management and health checks.

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{
    client_options, connect, connect_from_config, connect_from_config_with_retry,
    connect_with_retry,
};
pub use health::check_health;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
