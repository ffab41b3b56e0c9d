//! Client configuration: base URL, timeout and default headers.
//!
//! # Design
//! A `ClientConfig` is resolved once and then only read. `ApiClient` and
//! `TripPlannerClient` each take their own copy, so nothing in a call path
//! can change the URL, the headers or the timeout seen by another call.

use std::time::Duration;

/// Environment variable that overrides the backend base URL.
pub const BASE_URL_ENV: &str = "API_BASE_URL";

/// Base URL used when `API_BASE_URL` is unset or empty.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(120_000);

/// Immutable connection settings for the trip planning backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    default_headers: Vec<(String, String)>,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
            default_headers: vec![("content-type".to_string(), "application/json".to_string())],
        }
    }

    /// Resolve the base URL from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load a `.env` file (if one exists) into the environment, then resolve
    /// like [`ClientConfig::from_env`].
    pub fn from_dotenv() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!(path = %path.display(), "loaded .env file");
        }
        Self::from_env()
    }

    /// Resolve the base URL through `lookup`. An empty override counts as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        match lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            Some(url) => Self::new(url.trim()),
            None => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn default_headers(&self) -> &[(String, String)] {
        &self.default_headers
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
