//! # API Configuration
//!
//! Configuration management for the backend API client.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DEALDESK_API_URL=https://api.example.com                           │
//! │     DEALDESK_API_KEY=dd_live_...                                       │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/dealdesk/api.toml (Linux)                                │
//! │     ~/Library/Application Support/com.dealdesk.desk/api.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost backend, no key, 10s timeout                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # api.toml
//! [api]
//! base_url = "https://api.dealdesk.example"
//! api_key = "dd_live_4f8a..."
//! timeout_secs = 10
//! page_size = 25
//!
//! [retry]
//! max_retries = 3
//! initial_backoff_ms = 500
//! max_backoff_secs = 30
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// API Settings
// =============================================================================

/// Settings for reaching the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Base URL of the backend REST API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token for the `Authorization` header. Optional because a
    /// fresh install talks to a local development backend without auth.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Default page size for list endpoints.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_page_size() -> u32 {
    25
}

impl Default for ApiSettings {
    fn default() -> Self {
        ApiSettings {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            page_size: default_page_size(),
        }
    }
}

// =============================================================================
// Retry Settings
// =============================================================================

/// Retry behavior for idempotent reads.
///
/// Writes are never retried automatically: a create or status change that
/// timed out may still have landed, and replaying it is the user's call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Maximum retry attempts for a single read (0 = no retries).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Initial backoff duration (milliseconds).
    #[serde(default = "default_initial_backoff")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration (seconds).
    #[serde(default = "default_max_backoff")]
    pub max_backoff_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff() -> u64 {
    500
}

fn default_max_backoff() -> u64 {
    30
}

impl Default for RetrySettings {
    fn default() -> Self {
        RetrySettings {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff(),
            max_backoff_secs: default_max_backoff(),
        }
    }
}

// =============================================================================
// Main API Configuration
// =============================================================================

/// Complete API client configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend connection settings.
    #[serde(default)]
    pub api: ApiSettings,

    /// Retry behavior settings.
    #[serde(default)]
    pub retry: RetrySettings,
}

impl ApiConfig {
    /// Creates a new config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (api.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        // Try to load from config file
        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading API config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        // Override with environment variables
        config.apply_env_overrides();

        // Validate the configuration
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load API config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "API config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        // Base URL must parse and use an HTTP scheme
        let parsed = url::Url::parse(&self.api.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", self.api.base_url, e)))?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.api.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.api.page_size == 0 {
            return Err(ClientError::InvalidConfig(
                "page_size must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        // Base URL
        if let Ok(base_url) = std::env::var("DEALDESK_API_URL") {
            debug!(url = %base_url, "Overriding API base URL from environment");
            self.api.base_url = base_url;
        }

        // API key
        if let Ok(key) = std::env::var("DEALDESK_API_KEY") {
            debug!("Overriding API key from environment");
            self.api.api_key = Some(key);
        }

        // Timeout
        if let Ok(timeout) = std::env::var("DEALDESK_API_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse::<u64>() {
                self.api.timeout_secs = t;
            }
        }

        // Page size
        if let Ok(size) = std::env::var("DEALDESK_PAGE_SIZE") {
            if let Ok(s) = size.parse::<u32>() {
                self.api.page_size = s;
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "dealdesk", "desk").map(|dirs| {
            let config_dir = dirs.config_dir();
            config_dir.join("api.toml")
        })
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    /// Returns the API key if configured.
    pub fn api_key(&self) -> Option<&str> {
        self.api.api_key.as_deref()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_secs)
    }

    /// Returns the default page size for list calls.
    pub fn page_size(&self) -> u32 {
        self.api.page_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url(), "http://localhost:8080");
        assert!(config.api_key().is_none());
        assert_eq!(config.page_size(), 25);
        assert_eq!(config.retry.max_retries, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ApiConfig::default();

        // Non-HTTP scheme should fail
        config.api.base_url = "ws://example.com".to_string();
        assert!(config.validate().is_err());

        // Unparseable URL should fail
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        // Valid HTTPS URL should pass
        config.api.base_url = "https://api.example.com".to_string();
        assert!(config.validate().is_ok());

        // Zero page size should fail
        config.api.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ApiConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[api]"));
        assert!(toml_str.contains("[retry]"));

        let back: ApiConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(back.base_url(), config.base_url());
        assert_eq!(back.retry.max_retries, config.retry.max_retries);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: ApiConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://api.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.retry.initial_backoff_ms, 500);
    }
}
