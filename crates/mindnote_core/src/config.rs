//! Runtime configuration assembled from defaults and environment overrides.
//!
//! # Invariants
//! - Unset or blank variables fall back to defaults.
//! - Malformed values are reported, never silently replaced.

use crate::debounce::DEFAULT_DEBOUNCE;
use crate::logging::{default_log_level, normalize_level};
use crate::reflection::ReflectionConfig;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_DB_PATH: &str = "MINDNOTE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "MINDNOTE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MINDNOTE_LOG_DIR";
pub const ENV_REFLECTION_ENDPOINT: &str = "MINDNOTE_REFLECTION_ENDPOINT";
pub const ENV_REFLECTION_MODEL: &str = "MINDNOTE_REFLECTION_MODEL";
pub const ENV_MOCK_DELAY_MS: &str = "MINDNOTE_MOCK_DELAY_MS";
pub const ENV_DEBOUNCE_MS: &str = "MINDNOTE_DEBOUNCE_MS";

const DEFAULT_DB_FILE: &str = "mindnote.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value, reason } => {
                write!(f, "invalid value `{value}` for {key}: {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    /// File logging directory; `None` means the host picks a sink.
    pub log_dir: Option<PathBuf>,
    pub debounce: Duration,
    pub reflection: ReflectionConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE),
            log_level: default_log_level(),
            log_dir: None,
            debounce: DEFAULT_DEBOUNCE,
            reflection: ReflectionConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from defaults plus whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value_of = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };
        let mut config = Self::default();

        if let Some(path) = value_of(ENV_DB_PATH) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = value_of(ENV_LOG_LEVEL) {
            config.log_level =
                normalize_level(&level).map_err(|reason| invalid(ENV_LOG_LEVEL, &level, reason))?;
        }
        config.log_dir = value_of(ENV_LOG_DIR).map(PathBuf::from);
        if let Some(raw) = value_of(ENV_DEBOUNCE_MS) {
            config.debounce = parse_millis(ENV_DEBOUNCE_MS, &raw)?;
        }
        if let Some(endpoint) = value_of(ENV_REFLECTION_ENDPOINT) {
            config.reflection.endpoint = endpoint;
        }
        if let Some(model) = value_of(ENV_REFLECTION_MODEL) {
            config.reflection.model = model;
        }
        if let Some(raw) = value_of(ENV_MOCK_DELAY_MS) {
            config.reflection.mock_delay = parse_millis(ENV_MOCK_DELAY_MS, &raw)?;
        }

        Ok(config)
    }
}

fn parse_millis(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|err| invalid(key, raw, err.to_string()))
}

fn invalid(key: &'static str, value: &str, reason: String) -> ConfigError {
    ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason,
    }
}
