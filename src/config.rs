//! TOML configuration with environment overrides.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    core::history::DEFAULT_CAPACITY, runtime::handle::RuntimeConfig,
    view::DEFAULT_MAX_INTEGER_DIGITS,
};

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "vigha.toml";

/// `db_path` value selecting the in-memory store.
pub const MEMORY_DB_PATH: &str = ":memory:";

#[derive(Debug, thiserror::Error)]
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
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub history: HistoryConfig,
    pub input: InputConfig,
    pub suggest: SuggestConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub capacity: usize,
    pub debounce_ms: u64,
    /// SQLite file, or [`MEMORY_DB_PATH`] to keep history in memory.
    pub db_path: PathBuf,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            debounce_ms: 1000,
            db_path: PathBuf::from("vigha.db"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Integer-digit bound for the composite 7/12 fields.
    pub max_integer_digits: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_integer_digits: DEFAULT_MAX_INTEGER_DIGITS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestConfig {
    pub base_url: String,
    pub model: String,
    /// Environment variable holding the bearer token; unauthenticated when unset.
    pub api_key_env: Option<String>,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key_env: Some("OPENAI_API_KEY".to_string()),
        }
    }
}

impl HistoryConfig {
    pub fn is_in_memory(&self) -> bool {
        self.db_path.as_os_str() == MEMORY_DB_PATH
    }
}

impl Config {
    pub fn runtime(&self) -> RuntimeConfig {
        RuntimeConfig {
            capacity: self.history.capacity,
            ..RuntimeConfig::default()
        }
    }

    /// Settle delay before a view records its current value.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.history.debounce_ms)
    }
}

/// Reads `path`; a missing file yields `Ok(None)`.
pub fn load_file(path: &Path) -> Result<Option<Config>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents)
        .map(Some)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Loads `path` (or [`DEFAULT_CONFIG_FILE`]) and applies env overrides.
///
/// Load failures fall back to defaults with a warning.
pub fn load_or_default(path: Option<&Path>) -> Config {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut config = match load_file(&path) {
        Ok(Some(cfg)) => cfg,
        Ok(None) => Config::default(),
        Err(e) => {
            tracing::warn!("config load failed, using defaults: {e}");
            Config::default()
        }
    };
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    config
}

/// Applies `VIGHA_*` overrides read through `lookup`.
pub fn apply_env_overrides(config: &mut Config, lookup: impl Fn(&str) -> Option<String>) {
    let get = |name: &str| {
        lookup(name)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
    };

    if let Some(raw) = get("VIGHA_DB_PATH") {
        config.history.db_path = PathBuf::from(raw);
    }

    if let Some(raw) = get("VIGHA_DEBOUNCE_MS") {
        match raw.parse::<u64>() {
            Ok(value) => config.history.debounce_ms = value,
            Err(err) => tracing::warn!("invalid VIGHA_DEBOUNCE_MS, ignoring: {err}"),
        }
    }

    if let Some(raw) = get("VIGHA_SUGGEST_URL") {
        config.suggest.base_url = raw;
    }

    if let Some(raw) = get("VIGHA_SUGGEST_MODEL") {
        config.suggest.model = raw;
    }
}
