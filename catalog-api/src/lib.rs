//! # Catalog API
//!
//! HTTP front end for the product catalog search index.
//!
//! This crate provides the router, request handlers, configuration and
//! logging setup for the `catalog-api` binary. Every route is a thin layer
//! over `catalog_repository::SearchIndexClient`.

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use api::create_router;
pub use config::{Dependencies, Settings};
pub use error::ApiError;
pub use state::AppState;

use thiserror::Error;

/// Errors that can occur during server start-up or while serving.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] catalog_repository::SearchIndexError),

    /// Logging setup error.
    #[error("Logging error: {0}")]
    LoggingError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
