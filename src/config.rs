//! Application configuration
//!
//! Read from `~/.config/barbershop-booking/config.toml` unless
//! `BARBERSHOP_CONFIG` points elsewhere. A missing file yields defaults;
//! every section and field may be omitted.
//!
//! ```toml
//! [server]
//! api_host = "0.0.0.0"
//! api_port = 3333
//!
//! [database]
//! url = "sqlite://./barbershop.db?mode=rwc"
//!
//! [security]
//! jwt_secret = "change-me"
//! jwt_expiration_hours = 24
//!
//! [storage]
//! public_base_url = "https://cdn.example.com/uploads/"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::identity::DEFAULT_RESET_TTL_MINUTES;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::storage::DEFAULT_PUBLIC_BASE_URL;
use crate::infrastructure::DatabaseConfig;

pub const CONFIG_ENV_VAR: &str = "BARBERSHOP_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 3333,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_connections: db.max_connections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub password_reset_ttl_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            jwt_secret: jwt.secret,
            jwt_expiration_hours: jwt.expiration_hours,
            password_reset_ttl_minutes: DEFAULT_RESET_TTL_MINUTES,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Prefix of every uploaded photo URL; the rest of the URL is the object key
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive; `RUST_LOG` takes precedence
    pub level: String,
    /// `text` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

/// `~/.config/barbershop-booking/config.toml`, or `./config.toml` when the
/// platform has no config directory.
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .map(|dir| dir.join("barbershop-booking"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("config.toml")
}

/// Path from `BARBERSHOP_CONFIG`, falling back to [`default_config_path`].
pub fn resolve_config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(default_config_path)
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret is empty".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.security.password_reset_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid(
                "security.password_reset_ttl_minutes must be positive".into(),
            ));
        }
        if self.storage.public_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.public_base_url is empty".into()));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Invalid(
                "database.max_connections must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.server.api_host, self.server.api_port)
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig::new(
            self.security.jwt_secret.clone(),
            self.security.jwt_expiration_hours,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = AppConfig::from_toml_str("").unwrap();
        assert_eq!(cfg.server.api_port, 3333);
        assert_eq!(cfg.logging.format, "text");
        assert_eq!(
            cfg.security.password_reset_ttl_minutes,
            DEFAULT_RESET_TTL_MINUTES
        );
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [server]
            api_port = 8080

            [security]
            jwt_secret = "s3cret"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.jwt_config().secret, "s3cret");
        assert_eq!(cfg.api_address(), "0.0.0.0:8080");
    }

    #[test]
    fn storage_prefix_is_configurable() {
        let cfg = AppConfig::from_toml_str(
            "[storage]\npublic_base_url = \"https://cdn.example.com/u/\"\n",
        )
        .unwrap();
        assert_eq!(cfg.storage.public_base_url, "https://cdn.example.com/u/");
        assert_eq!(
            AppConfig::default().storage.public_base_url,
            DEFAULT_PUBLIC_BASE_URL
        );
    }

    #[test]
    fn rejects_empty_secret() {
        let err = AppConfig::from_toml_str("[security]\njwt_secret = \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = AppConfig::from_toml_str("[server\napi_port = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let cfg = AppConfig::load(Path::new("/nonexistent/barbershop/config.toml")).unwrap();
        assert_eq!(cfg.database.max_connections, DatabaseConfig::default().max_connections);
    }

    #[test]
    fn default_path_ends_with_app_dir() {
        let path = default_config_path();
        assert!(path.ends_with("barbershop-booking/config.toml"));
    }
}
