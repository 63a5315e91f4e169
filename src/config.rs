//! Configuration file support
//!
//! Settings can come from a YAML file; command-line flags are layered on top
//! by the CLI runner. Every field has a default except `api_url`.
//!
//! ```yaml
//! api_url: https://tolkiengateway.net/w/api.php
//! page_size: 500
//! delay_ms: 100
//! output: wiki_pages.json
//! http:
//!   timeout_seconds: 30
//!   max_retries: 0
//!   rate_limit:
//!     requests_per_second: 5
//! ```

use crate::collector::{CollectorConfig, DEFAULT_PAGE_SIZE};
use crate::error::{Error, Result};
use crate::http::{default_user_agent, HttpClientConfig, RateLimiterConfig};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

// ============================================================================
// Top-Level Settings
// ============================================================================

/// Settings for a collection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// The wiki's `api.php` endpoint
    #[serde(default)]
    pub api_url: Option<String>,

    /// Titles requested per call (`aplimit`)
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Pause between requests in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Where to write the title list
    #[serde(default)]
    pub output: Option<String>,

    /// Where to write the run summary
    #[serde(default)]
    pub summary: Option<String>,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: None,
            page_size: default_page_size(),
            delay_ms: default_delay_ms(),
            output: None,
            summary: None,
            http: HttpConfig::default(),
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_delay_ms() -> u64 {
    100
}

impl Settings {
    /// Check values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.api_url {
            if url.trim().is_empty() {
                return Err(Error::invalid_value("api_url", "cannot be empty"));
            }
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        if self.http.timeout_seconds == 0 {
            return Err(Error::invalid_value(
                "http.timeout_seconds",
                "must be greater than 0",
            ));
        }
        if let Some(rate_limit) = &self.http.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_value(
                    "http.rate_limit.requests_per_second",
                    "must be greater than 0",
                ));
            }
        }
        Ok(())
    }

    /// Build the collector configuration
    pub fn collector_config(&self) -> Result<CollectorConfig> {
        self.validate()?;
        let api_url = self.api_url.as_deref().ok_or_else(|| {
            Error::config("No API URL given (use --api-url or set api_url in the config file)")
        })?;

        Ok(CollectorConfig::new(api_url)
            .with_page_size(self.page_size)
            .with_delay(Duration::from_millis(self.delay_ms))
            .with_http(self.http.client_config()))
    }
}

// ============================================================================
// HTTP Config
// ============================================================================

/// HTTP client configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Maximum number of retries per request
    #[serde(default)]
    pub max_retries: u32,

    /// User agent; MediaWiki asks bots to identify themselves
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Extra headers for every request
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Retry backoff configuration
    #[serde(default)]
    pub backoff: BackoffConfig,

    /// Token bucket on top of the fixed pause
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            max_retries: 0,
            user_agent: None,
            headers: HashMap::new(),
            backoff: BackoffConfig::default(),
            rate_limit: None,
        }
    }
}

fn default_timeout() -> u64 {
    30
}

impl HttpConfig {
    /// Convert into the HTTP client's runtime config
    pub fn client_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff.backoff_type,
                Duration::from_millis(self.backoff.initial_ms),
                Duration::from_millis(self.backoff.max_ms),
            )
            .user_agent(
                self.user_agent
                    .clone()
                    .unwrap_or_else(default_user_agent),
            );

        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }

        match &self.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()).build(),
            None => builder.no_rate_limit().build(),
        }
    }
}

/// Backoff configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BackoffConfig {
    /// Type of backoff
    #[serde(rename = "type", default)]
    pub backoff_type: BackoffType,

    /// Initial delay in milliseconds
    #[serde(default = "default_initial_ms")]
    pub initial_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_ms")]
    pub max_ms: u64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            backoff_type: BackoffType::Exponential,
            initial_ms: default_initial_ms(),
            max_ms: default_max_ms(),
        }
    }
}

fn default_initial_ms() -> u64 {
    100
}

fn default_max_ms() -> u64 {
    60000
}

// ============================================================================
// Loading
// ============================================================================

/// Load settings from a YAML file
pub fn load_settings(path: impl AsRef<Path>) -> Result<Settings> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        Error::config(format!(
            "Failed to read config file '{}': {e}",
            path.display()
        ))
    })?;
    load_settings_from_str(&content)
}

/// Load settings from a YAML string
pub fn load_settings_from_str(yaml: &str) -> Result<Settings> {
    let settings: Settings = serde_yaml::from_str(yaml)?;
    settings.validate()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_settings_defaults() {
        let settings = Settings::default();
        assert!(settings.api_url.is_none());
        assert_eq!(settings.page_size, 500);
        assert_eq!(settings.delay_ms, 100);
        assert_eq!(settings.http.timeout_seconds, 30);
        assert_eq!(settings.http.max_retries, 0);
        assert!(settings.http.rate_limit.is_none());
    }

    #[test]
    fn test_load_full_yaml() {
        let yaml = r"
api_url: https://tolkiengateway.net/w/api.php
page_size: 250
delay_ms: 500
output: s3://lore/tolkien.json
summary: out/
http:
  timeout_seconds: 10
  max_retries: 2
  user_agent: lore-indexer/1.0 (ops@example.org)
  headers:
    X-Trace: abc
  backoff:
    type: linear
    initial_ms: 250
    max_ms: 2000
  rate_limit:
    requests_per_second: 2
    burst_size: 1
";
        let settings = load_settings_from_str(yaml).unwrap();

        assert_eq!(
            settings.api_url.as_deref(),
            Some("https://tolkiengateway.net/w/api.php")
        );
        assert_eq!(settings.page_size, 250);
        assert_eq!(settings.output.as_deref(), Some("s3://lore/tolkien.json"));
        assert_eq!(settings.summary.as_deref(), Some("out/"));
        assert_eq!(settings.http.backoff.backoff_type, BackoffType::Linear);

        let config = settings.collector_config().unwrap();
        assert_eq!(config.page_size, 250);
        assert_eq!(config.delay, Duration::from_millis(500));
        assert_eq!(config.http.timeout, Duration::from_secs(10));
        assert_eq!(config.http.max_retries, 2);
        assert_eq!(config.http.initial_backoff, Duration::from_millis(250));
        assert_eq!(config.http.user_agent, "lore-indexer/1.0 (ops@example.org)");
        assert_eq!(
            config.http.default_headers.get("X-Trace"),
            Some(&"abc".to_string())
        );
        assert_eq!(config.http.rate_limit, Some(RateLimiterConfig::new(2, 1)));
    }

    #[test]
    fn test_load_minimal_yaml() {
        let settings = load_settings_from_str("api_url: https://lotr.fandom.com/api.php").unwrap();
        let config = settings.collector_config().unwrap();

        assert_eq!(config.page_size, 500);
        assert_eq!(config.delay, Duration::from_millis(100));
        assert!(config.http.user_agent.starts_with("wiki-pages/"));
        assert!(config.http.rate_limit.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = load_settings_from_str("api_url: x\npagesize: 10").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let err = load_settings_from_str("page_size: 0").unwrap_err();
        assert!(err.to_string().contains("page_size"));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let yaml = "http:\n  rate_limit:\n    requests_per_second: 0";
        let err = load_settings_from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("requests_per_second"));
    }

    #[test]
    fn test_missing_api_url() {
        let err = Settings::default().collector_config().unwrap_err();
        assert!(err.to_string().contains("--api-url"));
    }

    #[test]
    fn test_load_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.yaml");
        fs::write(&path, "api_url: https://tolkiengateway.net/w/api.php\ndelay_ms: 0\n").unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.delay_ms, 0);

        let err = load_settings(dir.path().join("missing.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
