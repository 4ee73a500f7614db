//! Configuration for Catalog API

use core_config::{app_info, env_or_default, server::ServerConfig, AppInfo, FromEnv};
use database::mongodb::MongoConfig;
use domain_catalog::mongodb::PRODUCTS_COLLECTION;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Collection holding product documents (`CATALOG_COLLECTION`)
    pub collection: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let collection = env_or_default("CATALOG_COLLECTION", PRODUCTS_COLLECTION);

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            collection,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        temp_env::with_vars(
            [
                ("MONGODB_URL", Some("mongodb://db:27017")),
                ("MONGODB_DATABASE", Some("catalog")),
                ("CATALOG_COLLECTION", None),
                ("PORT", None),
                ("APP_ENV", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.collection, "products");
                assert_eq!(config.server.port, 4004);
                assert_eq!(config.environment, Environment::Development);
                assert_eq!(config.mongodb.url(), "mongodb://db:27017");
                assert_eq!(config.app.name, "catalog_api");
            },
        );
    }

    #[test]
    fn test_config_overrides() {
        temp_env::with_vars(
            [
                ("MONGO_URL", Some("mongodb://other:27017")),
                ("MONGO_DATABASE", Some("shop")),
                ("MONGODB_URL", None),
                ("MONGODB_DATABASE", None),
                ("CATALOG_COLLECTION", Some("items")),
                ("PORT", Some("8080")),
                ("APP_ENV", Some("production")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.collection, "items");
                assert_eq!(config.server.port, 8080);
                assert!(config.environment.is_production());
                assert_eq!(config.mongodb.database(), "shop");
            },
        );
    }

    #[test]
    fn test_config_requires_mongodb_url() {
        temp_env::with_vars_unset(["MONGODB_URL", "MONGO_URL"], || {
            assert!(Config::from_env().is_err());
        });
    }
}
