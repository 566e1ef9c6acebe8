use std::{fs, path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::ingest::PollConfig;

pub const APP_NAME: &str = "basin";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const DEFAULT_REMOTE: &str = "https://basin.tableland.xyz";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the vault service
    #[serde(default = "default_remote")]
    pub remote: Url,
    /// Cache window applied when creating vaults, in minutes
    #[serde(default)]
    pub cache_minutes: Option<u32>,
    /// How long to wait for a write to be listed
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,
    /// First delay between list attempts
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Cap for the doubling delay between list attempts
    #[serde(default = "default_poll_max_interval_ms")]
    pub poll_max_interval_ms: u64,
    /// Per-request timeout (unbounded if not set)
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

fn default_remote() -> Url {
    Url::parse(DEFAULT_REMOTE).expect("hardcoded URL must parse")
}

fn default_poll_timeout_secs() -> u64 {
    60
}

fn default_poll_interval_ms() -> u64 {
    1_000
}

fn default_poll_max_interval_ms() -> u64 {
    8_000
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            cache_minutes: None,
            poll_timeout_secs: default_poll_timeout_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            poll_max_interval_ms: default_poll_max_interval_ms(),
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            timeout: Duration::from_secs(self.poll_timeout_secs),
            initial_interval: Duration::from_millis(self.poll_interval_ms),
            max_interval: Duration::from_millis(self.poll_max_interval_ms),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Path to the basin directory (~/.basin)
    pub basin_dir: PathBuf,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Loaded configuration
    pub config: AppConfig,
}

impl AppState {
    /// Get the basin directory path (custom or default ~/.basin)
    pub fn basin_dir(custom_path: Option<PathBuf>) -> Result<PathBuf, StateError> {
        if let Some(path) = custom_path {
            return Ok(path);
        }

        let home = dirs::home_dir().ok_or(StateError::NoHomeDirectory)?;
        Ok(home.join(format!(".{}", APP_NAME)))
    }

    /// Initialize a new basin state directory
    pub fn init(
        custom_path: Option<PathBuf>,
        config: Option<AppConfig>,
    ) -> Result<Self, StateError> {
        let basin_dir = Self::basin_dir(custom_path)?;
        let config_path = basin_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            return Err(StateError::AlreadyInitialized);
        }

        fs::create_dir_all(&basin_dir)?;

        let config = config.unwrap_or_default();
        let config_toml = toml::to_string_pretty(&config)?;
        fs::write(&config_path, config_toml)?;

        Ok(Self {
            basin_dir,
            config_path,
            config,
        })
    }

    /// Load existing state from the basin directory
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self, StateError> {
        let basin_dir = Self::basin_dir(custom_path)?;

        if !basin_dir.exists() {
            return Err(StateError::NotInitialized);
        }

        let config_path = basin_dir.join(CONFIG_FILE_NAME);
        if !config_path.exists() {
            return Err(StateError::MissingFile(CONFIG_FILE_NAME.to_string()));
        }

        let config_toml = fs::read_to_string(&config_path)?;
        let config: AppConfig = toml::from_str(&config_toml)?;

        Ok(Self {
            basin_dir,
            config_path,
            config,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("basin directory not initialized. Run 'basin init' first")]
    NotInitialized,

    #[error("basin directory already initialized")]
    AlreadyInitialized,

    #[error("no home directory found")]
    NoHomeDirectory,

    #[error("missing required file: {0}")]
    MissingFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_load() {
        let temp = tempfile::tempdir().unwrap();
        let dir = temp.path().join("basin");

        let config = AppConfig {
            cache_minutes: Some(10800),
            ..AppConfig::default()
        };
        let state = AppState::init(Some(dir.clone()), Some(config.clone())).unwrap();
        assert!(state.config_path.exists());

        let loaded = AppState::load(Some(dir.clone())).unwrap();
        assert_eq!(loaded.config, config);

        assert!(matches!(
            AppState::init(Some(dir), None),
            Err(StateError::AlreadyInitialized)
        ));
    }

    #[test]
    fn test_load_missing_dir() {
        let result = AppState::load(Some(PathBuf::from("/nonexistent/basin")));
        assert!(matches!(result, Err(StateError::NotInitialized)));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = toml::from_str("cache_minutes = 60").unwrap();
        assert_eq!(config.cache_minutes, Some(60));
        assert_eq!(config.remote.as_str(), "https://basin.tableland.xyz/");
        assert_eq!(config.poll_config(), PollConfig::default());
        assert_eq!(config.request_timeout(), None);
    }
}
