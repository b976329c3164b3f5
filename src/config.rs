use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{MatchLimit, DEFAULT_LIMIT, DEFAULT_MIN_SCORE};
use crate::models::ScoringWeights;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Which preference store adapter to open
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
    pub database_url: Option<String>,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

impl StorageSettings {
    /// JSON file storage at `path`
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            backend: StorageBackend::File,
            path: path.into(),
            ..Self::default()
        }
    }

    /// PostgreSQL storage at `database_url`
    pub fn postgres(database_url: impl Into<String>) -> Self {
        Self {
            backend: StorageBackend::Postgres,
            database_url: Some(database_url.into()),
            ..Self::default()
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_store_path(),
            database_url: None,
            max_connections: None,
            min_connections: None,
            acquire_timeout_secs: None,
            idle_timeout_secs: None,
        }
    }
}

fn default_backend() -> StorageBackend { StorageBackend::File }

/// `~/.bg3connector/players.json`, or relative to the working directory without a home
pub fn default_store_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".bg3connector")
        .join("players.json")
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_score")]
    pub min_score: i64,
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    pub max_limit: Option<usize>,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            default_limit: default_limit(),
            max_limit: None,
        }
    }
}

impl MatchingSettings {
    /// Turn a requested limit into a [`MatchLimit`]
    ///
    /// `None` falls back to `default_limit`, `0` means unbounded, and
    /// `max_limit` caps the result when set.
    pub fn resolve_limit(&self, requested: Option<usize>) -> MatchLimit {
        let limit = MatchLimit::from_request(requested.unwrap_or(self.default_limit));
        match (limit, self.max_limit) {
            (MatchLimit::AtMost(n), Some(max)) => MatchLimit::AtMost(n.min(max)),
            (MatchLimit::Unbounded, Some(max)) => MatchLimit::AtMost(max),
            (limit, None) => limit,
        }
    }
}

fn default_min_score() -> i64 { DEFAULT_MIN_SCORE }
fn default_limit() -> usize { DEFAULT_LIMIT }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_platform_weight")]
    pub platform: i64,
    #[serde(default = "default_game_mode_weight")]
    pub game_mode: i64,
    #[serde(default = "default_level_range_weight")]
    pub level_range: i64,
    #[serde(default = "default_voice_chat_weight")]
    pub voice_chat: i64,
    #[serde(default = "default_timezone_weight")]
    pub timezone: i64,
    #[serde(default = "default_tags_weight")]
    pub tags: i64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            platform: default_platform_weight(),
            game_mode: default_game_mode_weight(),
            level_range: default_level_range_weight(),
            voice_chat: default_voice_chat_weight(),
            timezone: default_timezone_weight(),
            tags: default_tags_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            platform: config.platform,
            game_mode: config.game_mode,
            level_range: config.level_range,
            voice_chat: config.voice_chat,
            timezone: config.timezone,
            tags: config.tags,
        }
    }
}

fn default_platform_weight() -> i64 { 3 }
fn default_game_mode_weight() -> i64 { 3 }
fn default_level_range_weight() -> i64 { 2 }
fn default_voice_chat_weight() -> i64 { 1 }
fn default_timezone_weight() -> i64 { 1 }
fn default_tags_weight() -> i64 { 1 }

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
    /// 4. Environment variables (prefixed with BG3)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., BG3__SERVER__PORT -> server.port
            .add_source(environment())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?;

        apply_database_url(settings)?.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

fn environment() -> Environment {
    Environment::with_prefix("BG3")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

/// `DATABASE_URL` wins over `storage.database_url` when set
fn apply_database_url(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("DATABASE_URL") {
        Ok(url) if !url.is_empty() => Config::builder()
            .add_source(settings)
            .set_override("storage.database_url", url)?
            .build(),
        _ => Ok(settings),
    }
}
