use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use tracing::{debug, error, info};

use crate::config::ConfigError;

/// Where the catalog and the quotes live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub material_collection: String,
    pub quote_collection: String,
    pub pool_size: u32,
    /// Applies to both connect and server selection.
    pub connection_timeout_secs: u64,
}

impl MongoConfig {
    /// Reads the connection settings from the environment.
    ///
    /// MONGO_URI is required (MONGODB_URI is accepted as well). MONGO_DATABASE,
    /// MONGO_MATERIAL_COLLECTION, MONGO_QUOTE_COLLECTION, MONGO_POOL_SIZE and
    /// MONGO_CONNECTION_TIMEOUT fall back to [`MongoConfig::default`].
    /// MONGO_USERNAME/MONGO_PASSWORD are only used when both are set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = MongoConfig::default();

        let uri = env::var("MONGO_URI").or_else(|_| env::var("MONGODB_URI")).map_err(|_| {
            error!("Neither MONGO_URI nor MONGODB_URI is set");
            ConfigError::EnvVarNotFound("MONGO_URI".to_string())
        })?;

        let config = MongoConfig {
            uri,
            database: env::var("MONGO_DATABASE").unwrap_or(defaults.database),
            username: env::var("MONGO_USERNAME").ok(),
            password: env::var("MONGO_PASSWORD").ok(),
            material_collection: env::var("MONGO_MATERIAL_COLLECTION").unwrap_or(defaults.material_collection),
            quote_collection: env::var("MONGO_QUOTE_COLLECTION").unwrap_or(defaults.quote_collection),
            pool_size: parse_or("MONGO_POOL_SIZE", defaults.pool_size)?,
            connection_timeout_secs: parse_or("MONGO_CONNECTION_TIMEOUT", defaults.connection_timeout_secs)?,
        };
        config.validate()?;

        info!(
            database = %config.database,
            materials = %config.material_collection,
            quotes = %config.quote_collection,
            authenticated = config.username.is_some(),
            "MongoDB configuration loaded"
        );
        Ok(config)
    }

    /// Local settings for tests that talk to a developer database.
    pub fn from_test_env() -> Self {
        MongoConfig {
            database: "orcamento_papelaria_test".to_string(),
            material_collection: "test_materials".to_string(),
            quote_collection: "test_quotes".to_string(),
            pool_size: 2,
            connection_timeout_secs: 2,
            ..MongoConfig::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let problem = if self.uri.trim().is_empty() {
            Some("MongoDB URI cannot be empty")
        } else if self.database.trim().is_empty() {
            Some("database name cannot be empty")
        } else if self.material_collection.is_empty() || self.quote_collection.is_empty() {
            Some("collection names cannot be empty")
        } else if self.material_collection == self.quote_collection {
            Some("materials and quotes need distinct collections")
        } else if self.pool_size == 0 {
            Some("pool size must be positive")
        } else if self.connection_timeout_secs == 0 {
            Some("connection timeout must be positive")
        } else if self.username.as_deref() == Some("") || self.password.as_deref() == Some("") {
            Some("credentials cannot be blank when set")
        } else {
            None
        };

        match problem {
            Some(msg) => {
                error!("Invalid MongoDB configuration: {}", msg);
                Err(ConfigError::ValidationError(msg.to_string()))
            }
            None => Ok(()),
        }
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("{}={}", key, raw))),
        Err(_) => {
            debug!("{} not set, using default", key);
            Ok(default)
        }
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: "mongodb://localhost:27017".to_string(),
            database: "orcamento_papelaria".to_string(),
            username: None,
            password: None,
            material_collection: "materials".to_string(),
            quote_collection: "quotes".to_string(),
            pool_size: 10,
            connection_timeout_secs: 5,
        }
    }
}
