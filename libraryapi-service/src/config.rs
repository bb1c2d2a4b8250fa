use std::{
    env,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;

/// Application configuration.
///
/// Contains all configuration settings for the library service,
/// including storage and tracing settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Distribution metadata configuration
    pub distribution: DistributionConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Tracing configuration
    pub tracing: TracingConfig,
}

/// Database configuration.
///
/// Supports either in-memory storage or a `SQLite` database file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum DatabaseConfig {
    /// In-memory database storage
    Memory,
    /// `SQLite` database
    Sqlite(SqliteConfig),
}

/// `SQLite` database configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SqliteConfig {
    /// Path of the database file, created if missing
    pub path: PathBuf,
}

/// Tracing configuration.
///
/// Controls how tracing data is output from the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind")]
pub enum TracingConfig {
    /// In-memory tracing (no output)
    Memory,
    /// Standard output tracing
    Stdout,
}

/// Distribution metadata configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DistributionConfig {
    /// Distribution name
    pub name: String,
    /// Distribution version
    pub version: Option<String>,
}

const CONFIG_PATH_ENV: &str = "LIBRARYAPI_CONFIG_PATH";
const CONFIG_FILE_ENV: &str = "LIBRARYAPI_CONFIG_FILE";
const ENV_PREFIX: &str = "LIBRARYAPI";
const VERSION: &str = env!("CARGO_PKG_VERSION");

const DISTRIBUTION_VERSION_KEY: &str = "distribution.version";

impl AppConfig {
    /// Gets the global application configuration instance.
    ///
    /// Uses a static `OnceLock` to ensure the configuration is loaded only once.
    ///
    /// # Panics
    ///
    /// Will panic if the configuration cannot be loaded.
    pub fn get() -> &'static Self {
        static INSTANCE: OnceLock<AppConfig> = OnceLock::new();
        INSTANCE.get_or_init(|| Self::load().unwrap())
    }

    /// Loads configuration from the directory named by `LIBRARYAPI_CONFIG_PATH`,
    /// or `config` if unset.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load() -> AppResult<Self> {
        let config_path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config".to_string());
        Self::load_from(config_path)
    }

    /// Loads configuration from files in `config_path` and environment variables.
    ///
    /// Sources, later ones taking precedence: `default`, `local`, the file named
    /// by `LIBRARYAPI_CONFIG_FILE`, then `LIBRARYAPI__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be read or parsed.
    pub fn load_from<P: AsRef<Path>>(config_path: P) -> AppResult<Self> {
        let config_path = config_path.as_ref();

        let mut config_builder =
            Config::builder().set_default(DISTRIBUTION_VERSION_KEY, VERSION)?;

        // Initial "default" configuration file
        let default_path = config_path.join("default");
        config_builder =
            config_builder.add_source(File::with_name(&default_path.to_string_lossy()));

        // Add in a local configuration file
        // This file shouldn't be checked in to git
        let local_path = config_path.join("local");
        config_builder = config_builder
            .add_source(File::with_name(&local_path.to_string_lossy()).required(false));

        // Add override settings file.
        if let Ok(override_path) = env::var(CONFIG_FILE_ENV) {
            config_builder =
                config_builder.add_source(File::with_name(&override_path).required(false));
        }

        // Add in settings from the environment (with a prefix of LIBRARYAPI)
        config_builder = config_builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        );

        Ok(config_builder.build()?.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn load_layers() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
[distribution]
name = "libraryapi"

[database]
kind = "Sqlite"
path = "library.db"

[tracing]
kind = "Stdout"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.distribution.name, "libraryapi");
        assert_eq!(config.distribution.version.as_deref(), Some(VERSION));
        assert_eq!(
            config.database,
            DatabaseConfig::Sqlite(SqliteConfig {
                path: "library.db".into()
            })
        );
        assert_eq!(config.tracing, TracingConfig::Stdout);

        fs::write(
            dir.path().join("local.toml"),
            r#"
[database]
kind = "Memory"

[tracing]
kind = "Memory"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.database, DatabaseConfig::Memory);
        assert_eq!(config.tracing, TracingConfig::Memory);
    }

    #[test]
    fn missing_default() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load_from(dir.path()).is_err());
    }
}
