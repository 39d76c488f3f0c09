//! Configuration loading and management
//!
//! Configuration is a single YAML document. Every section and every key is
//! optional; anything left out takes its default.
//!
//! ```yaml
//! server:
//!   host: 0.0.0.0
//!   port: 8000
//! pagination:
//!   default_page_size: 20
//!   max_page_size: 100
//! logging:
//!   level: info
//! auth:
//!   bcrypt_cost: 12
//! ```

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

use crate::core::error::{ConfigError, SocialResult};
use crate::core::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, Paginator};

/// Environment variable naming the configuration file
pub const CONFIG_ENV_VAR: &str = "SOCIAL_CONFIG";

/// Configuration file used when [`CONFIG_ENV_VAR`] is unset
pub const DEFAULT_CONFIG_PATH: &str = "config/social.yaml";

/// Listening address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// Resolve host and port into a socket address
    ///
    /// `host` may be an IP literal or a name such as `localhost`; names take
    /// the first address the resolver returns.
    pub async fn socket_addr(&self) -> SocialResult<SocketAddr> {
        let invalid = |message: String| ConfigError::InvalidValue {
            field: "server.host".to_string(),
            message,
        };

        let mut addrs = tokio::net::lookup_host((self.host.as_str(), self.port))
            .await
            .map_err(|e| invalid(format!("'{}' is not a valid address: {}", self.host, e)))?;

        addrs
            .next()
            .ok_or_else(|| invalid(format!("'{}' resolved to no addresses", self.host)).into())
    }
}

/// Page size policy for every paginated endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub default_page_size: usize,
    pub max_page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: MAX_PAGE_SIZE,
        }
    }
}

impl PaginationConfig {
    pub fn paginator(&self) -> Paginator {
        Paginator::new(self.default_page_size, self.max_page_size)
    }
}

/// Default log filter, overridden by `RUST_LOG`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Work factor for password hashes
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub pagination: PaginationConfig,
    pub logging: LoggingConfig,
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> SocialResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError {
            file: Some(path.display().to_string()),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> SocialResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `SOCIAL_CONFIG`, or the default path
    ///
    /// A missing file is not an error: the defaults are used instead.
    pub fn load() -> SocialResult<Self> {
        let path = std::env::var(CONFIG_ENV_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::load_or_default(path)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> SocialResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::info!(path = %path.display(), "configuration file not found, using defaults");
            return Ok(Self::default());
        }
        Self::from_yaml_file(path)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pagination.default_page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_page_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.pagination.max_page_size < self.pagination.default_page_size {
            return Err(ConfigError::InvalidValue {
                field: "pagination.max_page_size".to_string(),
                message: format!(
                    "must be at least default_page_size ({})",
                    self.pagination.default_page_size
                ),
            });
        }
        if !(4..=31).contains(&self.auth.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                field: "auth.bcrypt_cost".to_string(),
                message: "must be between 4 and 31".to_string(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "logging.level".to_string(),
                message: "may not be empty".to_string(),
            });
        }
        Ok(())
    }
}
