use serde::{Deserialize, Serialize};
use std::env;

use crate::global::error::ConfigError;

pub const MONGODB_URL_ENV: &str = "MONGODB_URL";
pub const DEFAULT_MONGODB_URL: &str = "mongodb://localhost:27017";
pub const DATABASE_NAME: &str = "portfolio";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppSettings {
    pub log_level: String,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_to_file")]
    pub log_to_file: bool,
    #[serde(default = "default_log_directory")]
    pub log_directory: String,
    #[serde(default = "default_log_file_prefix")]
    pub log_file_prefix: String,
    #[serde(default = "default_log_rotation")]
    pub log_rotation: LogRotation,
    #[serde(default = "default_log_to_console")]
    pub log_to_console: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    Daily,
    Hourly,
    Never,
}

fn default_log_to_file() -> bool {
    false
}

fn default_log_directory() -> String {
    "./logs".to_string()
}

fn default_log_file_prefix() -> String {
    "portfolio-api".to_string()
}

fn default_log_rotation() -> LogRotation {
    LogRotation::Daily
}

fn default_log_to_console() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_to_file: default_log_to_file(),
            log_directory: default_log_directory(),
            log_file_prefix: default_log_file_prefix(),
            log_rotation: default_log_rotation(),
            log_to_console: default_log_to_console(),
        }
    }
}

/// MongoDB connection settings. The database name is fixed, see [`DATABASE_NAME`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl DatabaseConfig {
    /// Resolve the connection URL from `MONGODB_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        Self {
            url: resolve_mongodb_url(env::var(MONGODB_URL_ENV).ok()),
        }
    }

    pub fn name(&self) -> &'static str {
        DATABASE_NAME
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_MONGODB_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

/// An unset variable means the local default; a set one is taken verbatim.
pub fn resolve_mongodb_url(value: Option<String>) -> String {
    value.unwrap_or_else(|| DEFAULT_MONGODB_URL.to_string())
}

impl AppConfig {
    /// Load configuration from defaults, an optional config.toml and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::load_from(Some("config"), env::var(MONGODB_URL_ENV).ok())
    }

    /// Build the configuration from an optional config file (name without extension)
    /// and an optional `MONGODB_URL` value, which takes precedence over the file.
    pub fn load_from(file: Option<&str>, mongodb_url: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder()
            .set_default("app.log_level", "info")
            .and_then(|b| b.set_default("database.url", DEFAULT_MONGODB_URL))
            .and_then(|b| b.set_default("api.enabled", true))
            .and_then(|b| b.set_default("api.host", "127.0.0.1"))
            .and_then(|b| b.set_default("api.port", 8000))
            .and_then(|b| b.set_override_option("database.url", mongodb_url))
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        if let Some(name) = file {
            builder = builder.add_source(::config::File::with_name(name).required(false));
        }

        let config = builder
            .build()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        let app_config: AppConfig = config.try_deserialize()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        app_config.validate()?;

        Ok(app_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must not be empty".to_string()));
        }

        if self.api.enabled && self.api.port == 0 {
            return Err(ConfigError::Invalid("api.port must be non-zero when the API is enabled".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_file_or_env() {
        let config = AppConfig::load_from(None, None).unwrap();

        assert_eq!(config.app.log_level, "info");
        assert!(!config.app.logging.log_to_file);
        assert!(config.app.logging.log_to_console);
        assert_eq!(config.app.logging.log_rotation, LogRotation::Daily);
        assert_eq!(config.database.url, DEFAULT_MONGODB_URL);
        assert_eq!(config.database.name(), "portfolio");
        assert!(config.api.enabled);
        assert_eq!(config.api.host, "127.0.0.1");
        assert_eq!(config.api.port, 8000);
    }

    #[test]
    fn resolver_falls_back_to_localhost() {
        assert_eq!(resolve_mongodb_url(None), "mongodb://localhost:27017");
    }

    #[test]
    fn resolver_takes_set_url_verbatim() {
        let url = "mongodb://user:pw@db.internal:27018/?authSource=admin";
        assert_eq!(resolve_mongodb_url(Some(url.to_string())), url);
    }

    #[test]
    fn database_config_from_env_uses_resolver() {
        let config = DatabaseConfig::from_env();

        assert_eq!(config.url, resolve_mongodb_url(env::var(MONGODB_URL_ENV).ok()));
        assert_eq!(config.name(), "portfolio");
    }

    #[test]
    fn unset_url_falls_back_to_localhost() {
        let config = AppConfig::load_from(None, None).unwrap();
        assert_eq!(config.database.url, "mongodb://localhost:27017");
    }

    #[test]
    fn env_url_is_taken_verbatim() {
        let url = "mongodb://db.internal:27018/?replicaSet=rs0";
        let config = AppConfig::load_from(None, Some(url.to_string())).unwrap();
        assert_eq!(config.database.url, url);
    }

    #[test]
    fn file_values_sit_between_defaults_and_env() {
        let path = env::temp_dir().join(format!("portfolio-api-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[app]\nlog_level = \"debug\"\n\n[database]\nurl = \"mongodb://from-file:27017\"\n\n[api]\nport = 9000\n",
        )
        .unwrap();
        let name = path.to_str().unwrap();

        let from_file = AppConfig::load_from(Some(name), None).unwrap();
        let from_env = AppConfig::load_from(Some(name), Some("mongodb://from-env:27017".to_string())).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(from_file.app.log_level, "debug");
        assert_eq!(from_file.api.port, 9000);
        assert_eq!(from_file.api.host, "127.0.0.1");
        assert_eq!(from_file.database.url, "mongodb://from-file:27017");
        assert_eq!(from_env.database.url, "mongodb://from-env:27017");
    }

    #[test]
    fn missing_config_file_is_not_an_error() {
        let config = AppConfig::load_from(Some("does-not-exist"), None).unwrap();
        assert_eq!(config.api.port, 8000);
    }

    #[test]
    fn example_config_file_loads() {
        let config = AppConfig::load_from(Some("config.example.toml"), None).unwrap();
        assert_eq!(config.app.logging.log_file_prefix, "portfolio-api");
        assert_eq!(config.database.url, DEFAULT_MONGODB_URL);
    }

    #[test]
    fn empty_url_is_rejected() {
        let err = AppConfig::load_from(None, Some("  ".to_string())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }
}
