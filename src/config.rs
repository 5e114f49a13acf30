use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::models::domain::{
    ScoringWeights, DEFAULT_EXCELLENT_TIER, DEFAULT_GOOD_TIER, DEFAULT_LOCATION_WEIGHT,
    DEFAULT_MIN_SCORE, DEFAULT_NEUTRAL_WORK_DAYS, DEFAULT_NEUTRAL_WORK_HOURS,
    DEFAULT_WORK_DAYS_WEIGHT, DEFAULT_WORK_HOURS_WEIGHT, DEFAULT_WORK_TYPE_WEIGHT,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub backend: BackendSettings,
    /// The recommendation log is disabled when absent
    #[serde(default)]
    pub database: Option<DatabaseSettings>,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: Option<u32>,
    pub min_connections: Option<u32>,
    pub acquire_timeout_secs: Option<u64>,
    pub idle_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CacheSettings {
    /// Redis L2 tier; L1 only when unset or empty
    pub redis_url: Option<String>,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

impl MatchingSettings {
    /// Resolve a requested limit against the configured default and cap
    pub fn resolve_limit(&self, requested: Option<u16>) -> usize {
        let max = self.max_limit.unwrap_or(100).max(1);
        let limit = requested.unwrap_or_else(|| self.default_limit.unwrap_or(20));
        limit.clamp(1, max) as usize
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    #[serde(default = "default_neutral_work_days")]
    pub neutral_work_days: u32,
    #[serde(default = "default_neutral_work_hours")]
    pub neutral_work_hours: u32,
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default = "default_excellent_tier")]
    pub excellent_tier: u32,
    #[serde(default = "default_good_tier")]
    pub good_tier: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            neutral_work_days: default_neutral_work_days(),
            neutral_work_hours: default_neutral_work_hours(),
            min_score: default_min_score(),
            excellent_tier: default_excellent_tier(),
            good_tier: default_good_tier(),
        }
    }
}

impl From<&ScoringSettings> for ScoringWeights {
    fn from(settings: &ScoringSettings) -> Self {
        ScoringWeights {
            location: settings.weights.location,
            work_days: settings.weights.work_days,
            work_hours: settings.weights.work_hours,
            work_type: settings.weights.work_type,
            neutral_work_days: settings.neutral_work_days,
            neutral_work_hours: settings.neutral_work_hours,
            min_score: settings.min_score,
            excellent_tier: settings.excellent_tier,
            good_tier: settings.good_tier,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_location_weight")]
    pub location: u32,
    #[serde(default = "default_work_days_weight")]
    pub work_days: u32,
    #[serde(default = "default_work_hours_weight")]
    pub work_hours: u32,
    #[serde(default = "default_work_type_weight")]
    pub work_type: u32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            location: default_location_weight(),
            work_days: default_work_days_weight(),
            work_hours: default_work_hours_weight(),
            work_type: default_work_type_weight(),
        }
    }
}

fn default_location_weight() -> u32 { DEFAULT_LOCATION_WEIGHT }
fn default_work_days_weight() -> u32 { DEFAULT_WORK_DAYS_WEIGHT }
fn default_work_hours_weight() -> u32 { DEFAULT_WORK_HOURS_WEIGHT }
fn default_work_type_weight() -> u32 { DEFAULT_WORK_TYPE_WEIGHT }
fn default_neutral_work_days() -> u32 { DEFAULT_NEUTRAL_WORK_DAYS }
fn default_neutral_work_hours() -> u32 { DEFAULT_NEUTRAL_WORK_HOURS }
fn default_min_score() -> u32 { DEFAULT_MIN_SCORE }
fn default_excellent_tier() -> u32 { DEFAULT_EXCELLENT_TIER }
fn default_good_tier() -> u32 { DEFAULT_GOOD_TIER }

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

const ENV_PREFIX: &str = "SENIOR_MATCH";

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SENIOR_MATCH__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SENIOR_MATCH__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_conventional_env(settings)?;

        settings.try_deserialize()
    }
}

/// Apply the unprefixed variables deployment platforms usually set
///
/// `DATABASE_URL`, `REDIS_URL` and `BACKEND_URL` override the matching
/// config keys when present.
fn apply_conventional_env(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(url) = env::var("DATABASE_URL") {
        builder = builder.set_override("database.url", url)?;
    }
    if let Ok(url) = env::var("REDIS_URL") {
        builder = builder.set_override("cache.redis_url", url)?;
    }
    if let Ok(url) = env::var("BACKEND_URL") {
        builder = builder.set_override("backend.base_url", url)?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::from(&ScoringSettings::default());
        assert_eq!(weights, ScoringWeights::default());
        assert_eq!(weights.location, 40);
        assert_eq!(weights.work_days, 25);
        assert_eq!(weights.work_hours, 20);
        assert_eq!(weights.work_type, 15);
        assert_eq!(weights.min_score, 50);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }

    #[test]
    fn test_partial_scoring_section_keeps_defaults() {
        let scoring: ScoringSettings = toml::from_str(
            r#"
            min_score = 60

            [weights]
            location = 50
            "#,
        )
        .unwrap();

        assert_eq!(scoring.min_score, 60);
        assert_eq!(scoring.weights.location, 50);
        assert_eq!(scoring.weights.work_days, 25);
        assert_eq!(scoring.neutral_work_hours, 5);
    }

    #[test]
    fn test_shipped_default_config_parses() {
        let settings: Settings = toml::from_str(include_str!("../config/default.toml")).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert!(settings.database.is_none());
        assert_eq!(
            ScoringWeights::from(&settings.scoring),
            ScoringWeights::default()
        );
    }

    #[test]
    fn test_resolve_limit() {
        let matching = MatchingSettings {
            default_limit: Some(20),
            max_limit: Some(100),
        };

        assert_eq!(matching.resolve_limit(None), 20);
        assert_eq!(matching.resolve_limit(Some(5)), 5);
        assert_eq!(matching.resolve_limit(Some(500)), 100);
        assert_eq!(matching.resolve_limit(Some(0)), 1);
        assert_eq!(MatchingSettings::default().resolve_limit(None), 20);
    }
}
