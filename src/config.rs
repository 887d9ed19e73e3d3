//! Configuration management for taskmate
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{Result, TaskmateError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Upper bound for the artificial reply pacing delay
const MAX_REPLY_DELAY_MS: u64 = 60_000;

/// Main configuration structure for taskmate
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Backend REST API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Chat assistant settings
    #[serde(default)]
    pub chat: ChatConfig,
    /// Credential storage settings
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Backend REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout (seconds)
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Path of the schedule suggestion endpoint, relative to `base_url`
    #[serde(default = "default_suggestion_path")]
    pub suggestion_path: String,
}

fn default_base_url() -> String {
    "http://localhost:8080/api/v1".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_suggestion_path() -> String {
    "/tasks/suggestions".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout_seconds(),
            suggestion_path: default_suggestion_path(),
        }
    }
}

impl ApiConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Chat assistant configuration
///
/// Controls the artificial "thinking" delay applied before every assistant
/// reply. The actual delay is drawn uniformly from `[min, max]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Lower bound of the reply pacing delay (milliseconds)
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,

    /// Upper bound of the reply pacing delay (milliseconds)
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,
}

fn default_reply_delay_min_ms() -> u64 {
    1000
}

fn default_reply_delay_max_ms() -> u64 {
    2000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
        }
    }
}

/// Credential storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Keyring service name the API token is stored under
    #[serde(default = "default_keyring_service")]
    pub keyring_service: String,

    /// Keyring user/account name the API token is stored under
    #[serde(default = "default_keyring_user")]
    pub keyring_user: String,
}

fn default_keyring_service() -> String {
    "taskmate".to_string()
}

fn default_keyring_user() -> String {
    "api_token".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            keyring_service: default_keyring_service(),
            keyring_user: default_keyring_user(),
        }
    }
}

impl Config {
    /// Load configuration from file with environment and CLI overrides
    ///
    /// A missing file is not an error: defaults are used and a warning
    /// is logged.
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| TaskmateError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| TaskmateError::Config(format!("Failed to parse config: {}", e)).into())
    }

    fn apply_env_vars(&mut self) {
        if let Ok(base_url) = std::env::var("TASKMATE_API_BASE_URL") {
            self.api.base_url = base_url;
        }

        if let Ok(timeout) = std::env::var("TASKMATE_API_TIMEOUT_SECONDS") {
            if let Ok(value) = timeout.parse() {
                self.api.timeout_seconds = value;
            } else {
                tracing::warn!("Invalid TASKMATE_API_TIMEOUT_SECONDS: {}", timeout);
            }
        }

        if let Ok(path) = std::env::var("TASKMATE_SUGGESTION_PATH") {
            self.api.suggestion_path = path;
        }

        if let Ok(min) = std::env::var("TASKMATE_REPLY_DELAY_MIN_MS") {
            if let Ok(value) = min.parse() {
                self.chat.reply_delay_min_ms = value;
            } else {
                tracing::warn!("Invalid TASKMATE_REPLY_DELAY_MIN_MS: {}", min);
            }
        }

        if let Ok(max) = std::env::var("TASKMATE_REPLY_DELAY_MAX_MS") {
            if let Ok(value) = max.parse() {
                self.chat.reply_delay_max_ms = value;
            } else {
                tracing::warn!("Invalid TASKMATE_REPLY_DELAY_MAX_MS: {}", max);
            }
        }
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(api_url) = &cli.api_url {
            tracing::debug!("Using API base URL override: {}", api_url);
            self.api.base_url = api_url.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns `TaskmateError::Config` describing the first invalid field
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url).map_err(|e| {
            TaskmateError::Config(format!(
                "api.base_url is not a valid URL ({}): {}",
                self.api.base_url, e
            ))
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(TaskmateError::Config(format!(
                "api.base_url must use http or https, got: {}",
                base.scheme()
            ))
            .into());
        }

        if self.api.timeout_seconds == 0 {
            return Err(TaskmateError::Config(
                "api.timeout_seconds must be greater than 0".to_string(),
            )
            .into());
        }

        if !self.api.suggestion_path.starts_with('/') {
            return Err(TaskmateError::Config(
                "api.suggestion_path must start with '/'".to_string(),
            )
            .into());
        }

        if self.chat.reply_delay_min_ms > self.chat.reply_delay_max_ms {
            return Err(TaskmateError::Config(
                "chat.reply_delay_min_ms must not exceed chat.reply_delay_max_ms".to_string(),
            )
            .into());
        }

        if self.chat.reply_delay_max_ms > MAX_REPLY_DELAY_MS {
            return Err(TaskmateError::Config(format!(
                "chat.reply_delay_max_ms must be less than or equal to {}",
                MAX_REPLY_DELAY_MS
            ))
            .into());
        }

        if self.auth.keyring_service.is_empty() {
            return Err(
                TaskmateError::Config("auth.keyring_service cannot be empty".to_string()).into(),
            );
        }

        Ok(())
    }
}
