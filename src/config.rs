use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub landing: LandingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Locations of the catalog sources and the booking draft
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_goals_path")]
    pub goals_path: String,
    #[serde(default = "default_tutors_path")]
    pub tutors_path: String,
    #[serde(default = "default_draft_path")]
    pub draft_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            goals_path: default_goals_path(),
            tutors_path: default_tutors_path(),
            draft_path: default_draft_path(),
        }
    }
}

fn default_goals_path() -> String { "data/goals.json".to_string() }
fn default_tutors_path() -> String { "data/teachers.json".to_string() }
fn default_draft_path() -> String { "data/request.json".to_string() }

/// PostgreSQL settings; the ledger is disabled when `url` is unset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LandingSettings {
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

impl Default for LandingSettings {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
        }
    }
}

fn default_sample_size() -> usize { 6 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with TINYSTEPS_)
    /// 5. DATABASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., TINYSTEPS__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("TINYSTEPS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("TINYSTEPS")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Let the conventional DATABASE_URL variable enable the ledger
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("database.url", url)?
            .build(),
        _ => Ok(settings),
    }
}
