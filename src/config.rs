/// Runtime configuration
///
/// Defaults, then an optional JSON file, then environment overrides:
/// - Linux: ~/.config/room-glow/config.json
/// - macOS: ~/Library/Application Support/room-glow/config.json
/// - Windows: %APPDATA%\room-glow\config.json

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Overrides the analysis backend base URL
pub const ENV_API_URL: &str = "ROOMGLOW_API_URL";

/// Overrides the base URL used for the quiz call only
pub const ENV_QUIZ_API_URL: &str = "ROOMGLOW_QUIZ_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the analysis backend (no trailing slash)
    pub api_base_url: String,
    /// Separate base URL for `/api/quiz`, when it lives elsewhere
    pub quiz_api_base_url: Option<String>,
    /// Timeout for analyze/recommendations/quiz calls
    pub request_timeout_secs: u64,
    /// Song generation can take minutes on a cold backend
    pub song_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            quiz_api_base_url: None,
            request_timeout_secs: 60,
            song_timeout_secs: 330,
        }
    }
}

impl AppConfig {
    /// Load the effective configuration; never fails
    pub fn load() -> Self {
        let mut config = match Self::config_path() {
            Some(path) => Self::from_file(&path).unwrap_or_else(|e| {
                log::warn!("⚠️  Ignoring config file: {}", e);
                Self::default()
            }),
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.normalize();

        log::info!("⚙️  Backend at {}", config.api_base_url);
        config
    }

    /// Where the config file lives, if the platform has a config dir
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("room-glow");
        path.push("config.json");
        Some(path)
    }

    /// Read a config file; a missing file yields the defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment-style overrides from any lookup
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api_base_url = url;
        }
        if let Some(url) = lookup(ENV_QUIZ_API_URL).filter(|v| !v.trim().is_empty()) {
            self.quiz_api_base_url = Some(url);
        }
    }

    fn normalize(&mut self) {
        self.api_base_url = self.api_base_url.trim().trim_end_matches('/').to_string();
        self.quiz_api_base_url = self
            .quiz_api_base_url
            .take()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());
    }

    /// Base URL for the quiz call
    pub fn quiz_base_url(&self) -> &str {
        self.quiz_api_base_url
            .as_deref()
            .unwrap_or(&self.api_base_url)
    }
}
