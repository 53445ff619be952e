//! Service configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// RigForge service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// SQLite database file path
    pub database_path: String,

    /// Max pooled connections
    pub db_max_connections: u32,

    /// Default page size for listings
    pub default_page_size: u32,

    /// Hard cap on requested page sizes
    pub max_page_size: u32,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = ServiceConfig {
            database_path: env::var("RIGFORGE_DATABASE_PATH")
                .unwrap_or_else(|_| "./rigforge.db".to_string()),

            db_max_connections: env::var("RIGFORGE_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RIGFORGE_DB_MAX_CONNECTIONS".to_string()))?,

            default_page_size: env::var("RIGFORGE_DEFAULT_PAGE_SIZE")
                .unwrap_or_else(|_| "20".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RIGFORGE_DEFAULT_PAGE_SIZE".to_string()))?,

            max_page_size: env::var("RIGFORGE_MAX_PAGE_SIZE")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("RIGFORGE_MAX_PAGE_SIZE".to_string()))?,
        };

        if config.default_page_size == 0 || config.default_page_size > config.max_page_size {
            return Err(ConfigError::InvalidValue(
                "RIGFORGE_DEFAULT_PAGE_SIZE".to_string(),
            ));
        }

        Ok(config)
    }

    /// Clamps a requested page size to the configured bounds.
    pub fn page_size(&self, requested: Option<u32>) -> u32 {
        match requested {
            Some(0) | None => self.default_page_size,
            Some(n) => n.min(self.max_page_size),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            database_path: "./rigforge.db".to_string(),
            db_max_connections: 5,
            default_page_size: 20,
            max_page_size: 100,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_clamping() {
        let config = ServiceConfig::default();
        assert_eq!(config.page_size(None), 20);
        assert_eq!(config.page_size(Some(0)), 20);
        assert_eq!(config.page_size(Some(50)), 50);
        assert_eq!(config.page_size(Some(5000)), 100);
    }
}
