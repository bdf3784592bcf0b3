//! Configuration management module.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::router::Route;

/// Configuration load result.
#[derive(Debug)]
pub enum ConfigLoadResult {
    /// Config loaded successfully.
    Loaded(AppConfig),
    /// Config file missing (first run).
    Missing,
    /// Config file exists but invalid.
    Invalid(ConfigError),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Main application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// REST backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Serve built-in fixture data instead of calling the backend.
    #[serde(default)]
    pub use_fixtures: bool,
}

fn default_timeout_secs() -> u64 {
    30
}

/// Where the signed-in user id is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub file: PathBuf,
}

/// Report export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportsConfig {
    pub output_dir: PathBuf,
    #[serde(default)]
    pub ask_for_path: bool,
}

/// UI preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub start_route: String,
}

impl AppConfig {
    /// Get config file path (same directory as executable).
    pub fn default_path() -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Attempt to load config with detailed result.
    pub fn try_load(path: &Path) -> ConfigLoadResult {
        if !path.exists() {
            return ConfigLoadResult::Missing;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<AppConfig>(&content) {
                Ok(config) => match config.validate() {
                    Ok(()) => ConfigLoadResult::Loaded(config),
                    Err(e) => ConfigLoadResult::Invalid(e),
                },
                Err(e) => ConfigLoadResult::Invalid(ConfigError::Parse(e)),
            },
            Err(e) => ConfigLoadResult::Invalid(ConfigError::Read(e)),
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Validation("API base URL cannot be empty".to_string()));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::Validation(
                "API base URL must start with http:// or https://".to_string(),
            ));
        }
        if self.api.timeout_secs < 1 {
            return Err(ConfigError::Validation(
                "API timeout must be at least 1 second".to_string(),
            ));
        }
        if self.api.timeout_secs > 300 {
            return Err(ConfigError::Validation(
                "API timeout cannot exceed 300 seconds".to_string(),
            ));
        }
        if self.session.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation("Session file cannot be empty".to_string()));
        }
        if Route::from_path(&self.ui.start_route).is_none() {
            return Err(ConfigError::Validation(format!(
                "Unknown start route: {}",
                self.ui.start_route
            )));
        }
        Ok(())
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the session file against the directory holding the config file.
    pub fn session_path(&self, config_path: &Path) -> PathBuf {
        resolve_relative(&self.session.file, config_path)
    }

    /// Resolve the report output directory against the config directory.
    pub fn reports_dir(&self, config_path: &Path) -> PathBuf {
        resolve_relative(&self.reports.output_dir, config_path)
    }
}

fn resolve_relative(path: &Path, config_path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    config_path
        .parent()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5170".to_string(),
            timeout_secs: default_timeout_secs(),
            use_fixtures: false,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("session.toml"),
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            ask_for_path: false,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            start_route: Route::Home.path().to_string(),
        }
    }
}
