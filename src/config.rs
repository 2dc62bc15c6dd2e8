use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_TRIALS: u32 = 75_000;
pub const DEFAULT_PREFLOP_TRIALS: u32 = 500_000;
pub const DEFAULT_CHUNK_SIZE: u32 = 4_096;

#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Engine settings. Every field has a default, so a config file only needs
/// the keys it changes.
///
/// ```
/// use holdem_odds::config::EngineConfig;
///
/// let cfg: EngineConfig = serde_json::from_str(r#"{ "trials": 1000, "seed": 7 }"#).unwrap();
/// assert_eq!(cfg.trials, 1000);
/// assert_eq!(cfg.preflop_trials, 500_000);
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Trials per query with a known board.
    pub trials: u32,
    /// Trials per preflop distribution.
    pub preflop_trials: u32,
    /// Trials per parallel work unit.
    pub chunk_size: u32,
    /// Fixed seed for reproducible runs; fresh entropy per query when unset.
    pub seed: Option<u64>,
    pub parallel: bool,
    /// Backing file for the preflop cache; in-memory only when unset.
    pub cache_path: Option<PathBuf>,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            preflop_trials: DEFAULT_PREFLOP_TRIALS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: None,
            parallel: true,
            cache_path: None,
            log_level: "warn".to_string(),
        }
    }
}

impl EngineConfig {
    /// Load and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        let config: EngineConfig = serde_json::from_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trials == 0 {
            return Err(ConfigError::Invalid("trials must be at least 1".into()));
        }
        if self.preflop_trials == 0 {
            return Err(ConfigError::Invalid("preflop_trials must be at least 1".into()));
        }
        if self.chunk_size == 0 {
            return Err(ConfigError::Invalid("chunk_size must be at least 1".into()));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid("log_level must not be empty".into()));
        }
        Ok(())
    }
}
