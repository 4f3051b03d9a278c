use std::env;
use tracing::{debug, warn};

use crate::config::ConfigError;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    /// Load listener configuration from environment variables
    ///
    /// - APP_HOST: bind address (defaults to 0.0.0.0)
    /// - APP_PORT: bind port, falling back to PORT as set by hosting platforms (defaults to 3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        debug!("App host: {}", host);

        let port = match env::var("APP_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                ConfigError::InvalidValue(format!("Invalid port value: {}", raw))
            })?,
            Err(_) => {
                warn!("APP_PORT/PORT not set, using default: 3000");
                3000
            }
        };
        debug!("App port: {}", port);

        Ok(AppConfig { host, port })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}
