//! Configuration types for the search index client and its engine connection.

use std::time::Duration;

/// Default engine URL.
pub const DEFAULT_ENGINE_URL: &str = "http://localhost:9200";

/// Default per-request timeout towards the engine.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the SearchIndexClient.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Maximum number of documents allowed in a single batch operation.
    /// Set to None to disable the limit (not recommended for production).
    pub max_batch_size: Option<usize>,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            max_batch_size: Some(1000),
        }
    }
}

impl SearchIndexConfig {
    /// Create a config with no batch size limit (use with caution).
    pub fn unlimited() -> Self {
        Self {
            max_batch_size: None,
        }
    }

    /// Create a config with a custom batch size limit.
    pub fn with_max_batch_size(max_batch_size: usize) -> Self {
        Self {
            max_batch_size: Some(max_batch_size),
        }
    }
}

/// Basic-auth credentials for the engine.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// How to reach the engine and how to talk to it.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Engine base URL (e.g., "http://localhost:9200").
    pub url: String,
    /// Basic-auth credentials, if the cluster requires them.
    pub credentials: Option<Credentials>,
    /// Upper bound on every engine round trip.
    pub request_timeout: Duration,
    /// Keep raw response bodies in error diagnostics and log request bodies.
    pub debug_responses: bool,
    /// Wait for an index refresh after writes so they are searchable at once.
    pub refresh_on_write: bool,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENGINE_URL.to_string(),
            credentials: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            debug_responses: true,
            refresh_on_write: false,
        }
    }
}

impl ConnectionConfig {
    /// Create a connection config for the given URL with default settings.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Use basic authentication.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the per-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
