use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Port the HTTP server listens on
    #[serde(default = "default_port")]
    pub port: u16,
    /// SQLite connection string for the recipe store
    #[serde(default = "default_database_url")]
    pub database_url: String,
    /// Maximum number of pooled store connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Base URL of TheMealDB API
    #[serde(default = "default_mealdb_url")]
    pub mealdb_url: String,
    /// Request timeout in seconds, for both the store and TheMealDB
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Startup behaviour while the store is not reachable yet
    #[serde(default)]
    pub startup: StartupConfig,
}

/// Connect-and-retry settings used once, at process start
#[derive(Debug, Deserialize, Clone)]
pub struct StartupConfig {
    /// Number of extra connection attempts after the first one fails
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,
    /// Delay between connection attempts in milliseconds
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            connect_retries: default_connect_retries(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            database_url: default_database_url(),
            max_connections: default_max_connections(),
            mealdb_url: default_mealdb_url(),
            timeout: default_timeout(),
            startup: StartupConfig::default(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    3000
}

fn default_database_url() -> String {
    "sqlite://recipes.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

fn default_mealdb_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_retries() -> u32 {
    5
}

fn default_retry_delay_ms() -> u64 {
    5000
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BOX__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BOX__STARTUP__CONNECT_RETRIES
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    /// Configuration pointing at a private in-memory store
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables
///
/// See [`AppConfig::load`] for the source priority.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: RECIPE_BOX__STARTUP__RETRY_DELAY_MS
        .add_source(
            Environment::with_prefix("RECIPE_BOX")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        assert_eq!(default_port(), 3000);
        assert_eq!(default_max_connections(), 5);
        assert_eq!(default_connect_retries(), 5);
        assert_eq!(default_retry_delay_ms(), 5000);
        assert!(default_mealdb_url().starts_with("https://www.themealdb.com"));
    }

    #[test]
    fn test_startup_config_default() {
        let startup = StartupConfig::default();
        assert_eq!(startup.connect_retries, 5);
        assert_eq!(startup.retry_delay_ms, 5000);
    }

    #[test]
    fn test_in_memory_uses_single_connection() {
        let config = AppConfig::in_memory();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 1);
        assert_eq!(config.port, default_port());
    }

    #[test]
    fn test_load_config_without_file() {
        // Every field has a default, so an empty source set still deserializes
        let config = load_config().unwrap();
        assert!(config.max_connections >= 1);
        assert!(!config.mealdb_url.is_empty());
    }
}
