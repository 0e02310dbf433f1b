//! Settings read from the environment.

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use catalog_repository::{ConnectionConfig, Credentials, IndexConfig, SearchIndexConfig};

use crate::ServerError;

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default basic-auth user.
const DEFAULT_USERNAME: &str = "elastic";

/// Default basic-auth password.
const DEFAULT_PASSWORD: &str = "changeme";

/// Default index name.
const DEFAULT_INDEX: &str = "products";

/// Default per-request engine timeout, in seconds.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default maximum bulk batch size.
const DEFAULT_MAX_BATCH_SIZE: usize = 1000;

/// Default listen address.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Everything the server needs to start.
#[derive(Debug, Clone)]
pub struct Settings {
    pub listen_addr: SocketAddr,
    pub connection: ConnectionConfig,
    pub index: IndexConfig,
    pub search: SearchIndexConfig,
    /// Create the index with mappings at start-up if it is missing.
    pub ensure_index: bool,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: engine URL (default: http://localhost:9200)
    /// - `OPENSEARCH_USERNAME`: basic-auth user (default: elastic, empty disables auth)
    /// - `OPENSEARCH_PASSWORD`: basic-auth password (default: changeme)
    /// - `CATALOG_INDEX`: index name (default: products)
    /// - `CATALOG_DEBUG_RESPONSES`: keep raw engine responses in errors (default: true)
    /// - `CATALOG_REQUEST_TIMEOUT_SECS`: per-request engine timeout (default: 30)
    /// - `CATALOG_MAX_BATCH_SIZE`: largest accepted bulk batch (default: 1000)
    /// - `CATALOG_ENSURE_INDEX`: create the index at start-up (default: true)
    /// - `CATALOG_REFRESH_ON_WRITE`: wait for refresh after writes (default: false)
    /// - `CATALOG_LISTEN_ADDR`: HTTP listen address (default: 0.0.0.0:8080)
    /// - `LOG_FORMAT`: `pretty` or `json` (default: pretty)
    pub fn from_env() -> Result<Self, ServerError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let or_default =
            |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let url = or_default("OPENSEARCH_URL", DEFAULT_OPENSEARCH_URL);
        let username = or_default("OPENSEARCH_USERNAME", DEFAULT_USERNAME);
        let password = or_default("OPENSEARCH_PASSWORD", DEFAULT_PASSWORD);
        let index = or_default("CATALOG_INDEX", DEFAULT_INDEX);

        if index.trim().is_empty() {
            return Err(ServerError::config("CATALOG_INDEX must not be empty"));
        }

        let timeout_secs: u64 = parse_or(
            &lookup,
            "CATALOG_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ServerError::config(
                "CATALOG_REQUEST_TIMEOUT_SECS must be positive",
            ));
        }

        let max_batch_size: usize =
            parse_or(&lookup, "CATALOG_MAX_BATCH_SIZE", DEFAULT_MAX_BATCH_SIZE)?;
        let default_addr: SocketAddr = DEFAULT_LISTEN_ADDR
            .parse()
            .map_err(|e| ServerError::config(format!("default listen address: {}", e)))?;
        let listen_addr = parse_or(&lookup, "CATALOG_LISTEN_ADDR", default_addr)?;

        let mut connection = ConnectionConfig::new(url)
            .with_request_timeout(Duration::from_secs(timeout_secs));
        if !username.is_empty() {
            connection = connection.with_credentials(Credentials::new(username, password));
        }
        connection.debug_responses = parse_bool_or(&lookup, "CATALOG_DEBUG_RESPONSES", true)?;
        connection.refresh_on_write = parse_bool_or(&lookup, "CATALOG_REFRESH_ON_WRITE", false)?;

        // Reject a malformed URL here rather than on the first request
        url::Url::parse(&connection.url)
            .map_err(|e| ServerError::config(format!("OPENSEARCH_URL is invalid: {}", e)))?;

        Ok(Self {
            listen_addr,
            connection,
            index: IndexConfig::new(index),
            search: SearchIndexConfig::with_max_batch_size(max_batch_size),
            ensure_index: parse_bool_or(&lookup, "CATALOG_ENSURE_INDEX", true)?,
            log_format: parse_or(&lookup, "LOG_FORMAT", LogFormat::Pretty)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ServerError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ServerError::config(format!("{} is invalid: {}", key, e))),
        None => Ok(default),
    }
}

fn parse_bool_or<F>(lookup: &F, key: &str, default: bool) -> Result<bool, ServerError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref().map(str::trim) {
        None => Ok(default),
        Some("1") | Some("true") | Some("yes") | Some("on") => Ok(true),
        Some("0") | Some("false") | Some("no") | Some("off") => Ok(false),
        Some(other) => Err(ServerError::config(format!(
            "{} is invalid: expected a boolean, got '{}'",
            key, other
        ))),
    }
}
