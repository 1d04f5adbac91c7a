//! # Core Configuration Module
//!
//! Provides configuration management for the playback core.
//!
//! ## Overview
//!
//! The configuration system uses a builder pattern to construct a `CoreConfig`
//! instance that holds all necessary dependencies and settings for the core
//! library. It enforces fail-fast validation so a misconfigured host learns
//! about the problem at startup rather than mid-playback.
//!
//! ## Dependencies
//!
//! - `HttpClient` - injected transport for the suggestion and search clients
//!   (desktop hosts typically pass the reqwest-backed adapter from
//!   `bridge-desktop`)
//!
//! The media engine itself is not held here; it is handed directly to the
//! playback orchestrator together with its signal channel.
//!
//! ## Usage
//!
//! ```ignore
//! use core_runtime::config::{CoreConfig, SearchApiConfig};
//! use std::sync::Arc;
//!
//! let config = CoreConfig::builder()
//!     .http_client(Arc::new(MyHttpClient))
//!     .search_api(SearchApiConfig::new().with_api_key("key-from-env"))
//!     .build()
//!     .expect("Failed to build config");
//! ```

use crate::error::{Error, Result};
use bridge_traits::HttpClient;
use std::sync::Arc;
use std::time::Duration;

/// Core configuration for the playback core.
///
/// This struct holds all dependencies and settings required to initialize
/// the core library. Use [`CoreConfigBuilder`] to construct instances.
#[derive(Clone)]
pub struct CoreConfig {
    /// HTTP client for making API requests
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Remote search and suggestion API configuration
    pub search_api: SearchApiConfig,

    /// Timing knobs for the playback orchestrator and suggestion layer
    pub tuning: PlaybackTuning,

    /// Event bus buffer size
    pub event_buffer_size: usize,
}

impl std::fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoreConfig")
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field("search_api", &self.search_api)
            .field("tuning", &self.tuning)
            .field("event_buffer_size", &self.event_buffer_size)
            .finish()
    }
}

impl CoreConfig {
    /// Creates a new builder for constructing a `CoreConfig`.
    pub fn builder() -> CoreConfigBuilder {
        CoreConfigBuilder::default()
    }

    /// Returns the injected HTTP client or a capability-missing error with
    /// actionable guidance.
    pub fn require_http_client(&self) -> Result<Arc<dyn HttpClient>> {
        self.http_client.clone().ok_or_else(|| Error::CapabilityMissing {
            capability: "HttpClient".to_string(),
            message: "No HTTP client implementation provided. \
                      Desktop: inject bridge_desktop::ReqwestHttpClient. \
                      Other hosts: inject a platform-native HttpClient adapter."
                .to_string(),
        })
    }

    /// Validates the configuration and returns an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.search_api.validate()?;
        self.tuning.validate()?;

        if self.event_buffer_size == 0 {
            return Err(Error::Config(
                "Event buffer size must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Configuration for the remote search and suggestion endpoints.
///
/// # Security Note
///
/// API keys should never be hardcoded in the binary. They should be loaded
/// from environment variables or injected via the host platform's secure
/// configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchApiConfig {
    /// API key for the catalog search endpoint
    ///
    /// This is optional - if not provided, track search and fallback
    /// suggestions are disabled; primary suggestions still work.
    pub api_key: Option<String>,

    /// Base URL of the catalog data API
    pub search_base_url: String,

    /// Base URL of the autocomplete endpoint
    pub suggest_base_url: String,

    /// Default number of results for track searches
    pub default_max_results: u8,
}

/// Default catalog API base.
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Default autocomplete endpoint base.
pub const DEFAULT_SUGGEST_BASE_URL: &str = "https://suggestqueries.google.com/complete/search";

impl Default for SearchApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
            suggest_base_url: DEFAULT_SUGGEST_BASE_URL.to_string(),
            default_max_results: 10,
        }
    }
}

impl SearchApiConfig {
    /// Creates a new config with default endpoints and no API key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Overrides the catalog API base URL (useful for tests and proxies).
    pub fn with_search_base_url(mut self, url: impl Into<String>) -> Self {
        self.search_base_url = url.into();
        self
    }

    /// Overrides the autocomplete endpoint base URL.
    pub fn with_suggest_base_url(mut self, url: impl Into<String>) -> Self {
        self.suggest_base_url = url.into();
        self
    }

    /// Sets the default number of track search results.
    pub fn with_default_max_results(mut self, max_results: u8) -> Self {
        self.default_max_results = max_results;
        self
    }

    /// Checks if the catalog search API is usable.
    pub fn has_search_api(&self) -> bool {
        self.api_key.is_some()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref key) = self.api_key {
            if key.trim().is_empty() {
                return Err(Error::Config("API key cannot be empty".to_string()));
            }
        }

        if self.search_base_url.is_empty() {
            return Err(Error::Config("Search base URL cannot be empty".to_string()));
        }

        if self.suggest_base_url.is_empty() {
            return Err(Error::Config(
                "Suggest base URL cannot be empty".to_string(),
            ));
        }

        if self.default_max_results == 0 {
            return Err(Error::Config(
                "Default max results must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Timing knobs for the orchestrator and the suggestion layer.
///
/// Defaults mirror the behavior listeners expect: a 1 s position poll, a
/// short grace delay before skipping past an ended or failed track, and a
/// 300 ms keystroke debounce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackTuning {
    /// Interval between position polls while playing
    pub poll_interval: Duration,

    /// Grace delay between a track ending naturally and auto-advance
    pub ended_grace: Duration,

    /// Grace delay between an engine error and auto-advance
    pub error_grace: Duration,

    /// Debounce window for suggestion requests
    pub suggestion_debounce: Duration,

    /// Volume applied when the engine first reports ready (0-100)
    pub initial_volume: u8,
}

impl Default for PlaybackTuning {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            ended_grace: Duration::from_millis(500),
            error_grace: Duration::from_millis(1000),
            suggestion_debounce: Duration::from_millis(300),
            initial_volume: 50,
        }
    }
}

impl PlaybackTuning {
    /// Validates the tuning values.
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval.is_zero() {
            return Err(Error::Config(
                "Poll interval must be greater than zero".to_string(),
            ));
        }

        if self.poll_interval > Duration::from_secs(60) {
            return Err(Error::Config(
                "Poll interval exceeds maximum of 60 seconds".to_string(),
            ));
        }

        if self.initial_volume > 100 {
            return Err(Error::Config(
                "Initial volume must be in the range 0-100".to_string(),
            ));
        }

        if self.suggestion_debounce > Duration::from_secs(10) {
            return Err(Error::Config(
                "Suggestion debounce exceeds maximum of 10 seconds".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for constructing [`CoreConfig`] instances.
///
/// Use this builder to incrementally set configuration options and then
/// call [`build()`](CoreConfigBuilder::build) to create the final config.
/// The builder validates the result and provides helpful error messages.
#[derive(Default)]
pub struct CoreConfigBuilder {
    http_client: Option<Arc<dyn HttpClient>>,
    search_api: Option<SearchApiConfig>,
    tuning: Option<PlaybackTuning>,
    event_buffer_size: Option<usize>,
}

impl CoreConfigBuilder {
    /// Sets the HTTP client implementation.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the search API configuration.
    pub fn search_api(mut self, config: SearchApiConfig) -> Self {
        self.search_api = Some(config);
        self
    }

    /// Sets the playback tuning knobs.
    pub fn tuning(mut self, tuning: PlaybackTuning) -> Self {
        self.tuning = Some(tuning);
        self
    }

    /// Sets the event bus buffer size.
    ///
    /// Default: 100
    pub fn event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = Some(size);
        self
    }

    /// Builds the final `CoreConfig` instance.
    ///
    /// # Returns
    ///
    /// Returns `Ok(CoreConfig)` on success, or an error if configuration
    /// values are invalid.
    pub fn build(self) -> Result<CoreConfig> {
        let config = CoreConfig {
            http_client: self.http_client,
            search_api: self.search_api.unwrap_or_default(),
            tuning: self.tuning.unwrap_or_default(),
            event_buffer_size: self
                .event_buffer_size
                .unwrap_or(crate::events::DEFAULT_EVENT_BUFFER_SIZE),
        };

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use bridge_traits::error::Result;
    use bridge_traits::{HttpRequest, HttpResponse};
    use mockall::mock;

    mock! {
        HttpClient {}

        #[async_trait]
        impl HttpClient for HttpClient {
            async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
        }
    }

    #[test]
    fn test_build_with_defaults() {
        let config = CoreConfig::builder().build().unwrap();
        assert!(config.http_client.is_none());
        assert_eq!(config.event_buffer_size, 100);
        assert_eq!(config.tuning.poll_interval, Duration::from_secs(1));
        assert_eq!(config.tuning.ended_grace, Duration::from_millis(500));
        assert_eq!(config.tuning.error_grace, Duration::from_millis(1000));
        assert_eq!(config.tuning.initial_volume, 50);
    }

    #[test]
    fn test_require_http_client_missing() {
        let config = CoreConfig::builder().build().unwrap();
        let err = config.require_http_client().err().unwrap();
        let msg = err.to_string();
        assert!(msg.contains("HttpClient"));
        assert!(msg.contains("inject"));
    }

    #[test]
    fn test_require_http_client_present() {
        let config = CoreConfig::builder()
            .http_client(Arc::new(MockHttpClient::new()))
            .build()
            .unwrap();
        assert!(config.require_http_client().is_ok());
    }

    #[test]
    fn test_search_api_requires_nonempty_key() {
        let result = CoreConfig::builder()
            .search_api(SearchApiConfig::new().with_api_key("   "))
            .build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("API key"));
    }

    #[test]
    fn test_search_api_detects_availability() {
        let without_key = SearchApiConfig::new();
        assert!(!without_key.has_search_api());

        let with_key = SearchApiConfig::new().with_api_key("k");
        assert!(with_key.has_search_api());
    }

    #[test]
    fn test_tuning_rejects_zero_poll_interval() {
        let tuning = PlaybackTuning {
            poll_interval: Duration::ZERO,
            ..Default::default()
        };
        let result = CoreConfig::builder().tuning(tuning).build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Poll interval"));
    }

    #[test]
    fn test_tuning_rejects_volume_above_100() {
        let tuning = PlaybackTuning {
            initial_volume: 101,
            ..Default::default()
        };
        let result = CoreConfig::builder().tuning(tuning).build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("volume"));
    }

    #[test]
    fn test_rejects_zero_event_buffer() {
        let result = CoreConfig::builder().event_buffer_size(0).build();

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("buffer"));
    }

    #[test]
    fn test_config_is_cloneable() {
        let config = CoreConfig::builder()
            .http_client(Arc::new(MockHttpClient::new()))
            .build()
            .unwrap();

        let cloned = config.clone();
        assert_eq!(cloned.event_buffer_size, config.event_buffer_size);
        assert!(cloned.http_client.is_some());
    }
}
