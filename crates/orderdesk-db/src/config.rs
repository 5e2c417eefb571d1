//! # Configuration
//!
//! Application settings loaded from TOML, with environment overrides.
//!
//! ## Load Order (later overrides earlier)
//! 1. Default values
//! 2. Config file (`orderdesk.toml`, explicit path or the platform config dir)
//! 3. Environment variables (`ORDERDESK_*`)
//! 4. Validation
//!
//! ## Example File
//! ```toml
//! [database]
//! path = "/var/lib/orderdesk/orderdesk.db"
//! max_connections = 5
//! min_connections = 1
//! connect_timeout_secs = 30
//! idle_timeout_secs = 600
//! run_migrations = true
//!
//! [logging]
//! filter = "info,orderdesk=debug,sqlx=warn"
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::pool::DbConfig;

/// Default tracing filter for binaries.
pub const DEFAULT_LOG_FILTER: &str = "info,orderdesk=debug,sqlx=warn";

const CONFIG_FILE_NAME: &str = "orderdesk.toml";
const DB_FILE_NAME: &str = "orderdesk.db";

// =============================================================================
// Sections
// =============================================================================

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// SQLite file. Created when missing.
    pub path: PathBuf,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub run_migrations: bool,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        DatabaseSettings {
            path: default_database_path(),
            max_connections: 5,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            run_migrations: true,
        }
    }
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directive string. `RUST_LOG` wins.
    pub filter: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

// =============================================================================
// App Config
// =============================================================================

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// A missing file is not an error; an unreadable or malformed one is.
    pub fn load(config_path: Option<PathBuf>) -> DbResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = Self::from_toml(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns the defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        let (config, failure) = Self::load_or_fallback(config_path);
        if let Some(e) = failure {
            warn!("Failed to load config: {}. Using defaults.", e);
        }
        config
    }

    /// Like [`load_or_default`](Self::load_or_default), but hands the load
    /// error back instead of logging it.
    ///
    /// For callers that install their log subscriber from the loaded config
    /// and can only report the failure afterwards.
    pub fn load_or_fallback(config_path: Option<PathBuf>) -> (Self, Option<DbError>) {
        match Self::load(config_path) {
            Ok(config) => (config, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Parses a TOML document; absent keys keep their defaults.
    pub fn from_toml(contents: &str) -> DbResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Checks value ranges.
    pub fn validate(&self) -> DbResult<()> {
        let db = &self.database;

        if db.path.as_os_str().is_empty() {
            return Err(DbError::InvalidConfig("database.path is empty".into()));
        }

        if db.max_connections == 0 {
            return Err(DbError::InvalidConfig(
                "database.max_connections must be greater than 0".into(),
            ));
        }

        if db.min_connections > db.max_connections {
            return Err(DbError::InvalidConfig(format!(
                "database.min_connections ({}) exceeds max_connections ({})",
                db.min_connections, db.max_connections
            )));
        }

        if db.connect_timeout_secs == 0 {
            return Err(DbError::InvalidConfig(
                "database.connect_timeout_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `ORDERDESK_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("ORDERDESK_DB_PATH") {
            debug!(path = %path, "Overriding database path from environment");
            self.database.path = PathBuf::from(path);
        }

        if let Some(max) = lookup("ORDERDESK_MAX_CONNECTIONS") {
            match max.parse::<u32>() {
                Ok(n) => self.database.max_connections = n,
                Err(_) => warn!(value = %max, "Ignoring invalid ORDERDESK_MAX_CONNECTIONS"),
            }
        }

        if let Some(filter) = lookup("ORDERDESK_LOG") {
            self.logging.filter = filter;
        }
    }

    /// `<platform config dir>/orderdesk.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orderdesk", "orderdesk")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }
}

/// `<platform data dir>/orderdesk.db`, or `./orderdesk.db` when the platform
/// has no home directory.
pub fn default_database_path() -> PathBuf {
    directories::ProjectDirs::from("com", "orderdesk", "orderdesk")
        .map(|dirs| dirs.data_dir().join(DB_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DB_FILE_NAME))
}

impl From<&DatabaseSettings> for DbConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        DbConfig::new(settings.path.clone())
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(settings.idle_timeout_secs))
            .run_migrations(settings.run_migrations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.run_migrations);
        assert_eq!(config.logging.filter, DEFAULT_LOG_FILTER);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [database]
            path = "/tmp/shop.db"
            max_connections = 8
            "#,
        )
        .unwrap();

        assert_eq!(config.database.path, PathBuf::from("/tmp/shop.db"));
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.database.min_connections, 1);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_malformed_toml() {
        let err = AppConfig::from_toml("[database\npath = 1").unwrap_err();
        assert!(matches!(err, DbError::ConfigLoadFailed(_)));
    }

    #[test]
    fn test_validation() {
        let mut config = AppConfig::default();

        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        config.database.max_connections = 2;
        config.database.min_connections = 3;
        assert!(config.validate().is_err());

        config.database.min_connections = 1;
        config.database.path = PathBuf::new();
        assert!(matches!(config.validate(), Err(DbError::InvalidConfig(_))));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            ("ORDERDESK_DB_PATH", "/data/od.db"),
            ("ORDERDESK_MAX_CONNECTIONS", "not-a-number"),
            ("ORDERDESK_LOG", "warn"),
        ]
        .into_iter()
        .collect();

        let mut config = AppConfig::default();
        config.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.database.path, PathBuf::from("/data/od.db"));
        assert_eq!(config.database.max_connections, 5);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_malformed_file_falls_back_with_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orderdesk.toml");
        std::fs::write(&path, "[database\nmax_connections = ").unwrap();

        let (config, failure) = AppConfig::load_or_fallback(Some(path.clone()));
        assert!(matches!(failure, Some(DbError::ConfigLoadFailed(_))));
        assert_eq!(config.database.max_connections, 5);

        std::fs::write(&path, "[database]\nmax_connections = 3\n").unwrap();
        let (config, failure) = AppConfig::load_or_fallback(Some(path));
        assert!(failure.is_none());
        assert_eq!(config.database.max_connections, 3);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("orderdesk-test-no-such-config.toml");
        let config = AppConfig::load_or_default(Some(path));
        assert_eq!(config.database.min_connections, 1);
    }

    #[test]
    fn test_db_config_from_settings() {
        let settings = DatabaseSettings {
            path: PathBuf::from("/tmp/x.db"),
            max_connections: 3,
            min_connections: 2,
            connect_timeout_secs: 7,
            idle_timeout_secs: 90,
            run_migrations: false,
        };

        let config = DbConfig::from(&settings);
        assert_eq!(config.max_connections, 3);
        assert_eq!(config.connect_timeout, Duration::from_secs(7));
        assert_eq!(config.idle_timeout, Duration::from_secs(90));
        assert!(!config.run_migrations);
    }
}
