//! Dependency initialization and wiring for the catalog API.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::Settings;
use crate::ServerError;
use catalog_repository::{OpenSearchClient, SearchIndexClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The search index client shared by every request handler.
    pub search: Arc<SearchIndexClient>,
}

impl Dependencies {
    /// Build the engine client and, if configured, bootstrap the index.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServerError)` - If the client cannot be built or the index
    ///   cannot be created
    pub async fn new(settings: &Settings) -> Result<Self, ServerError> {
        info!(
            opensearch_url = %settings.connection.url,
            index = %settings.index.name,
            max_batch_size = ?settings.search.max_batch_size,
            "Initializing dependencies"
        );

        let provider = OpenSearchClient::new(&settings.connection, settings.index.clone())
            .map_err(|e| {
                ServerError::config(format!("Failed to create OpenSearch client: {}", e))
            })?;

        let search = SearchIndexClient::with_config(Box::new(provider), settings.search.clone());

        if settings.ensure_index {
            search.ensure_index().await?;
            info!("Index ready");
        } else if !search.health_check().await {
            // Start anyway; /test reports the engine state
            warn!("OpenSearch is not reachable at start-up");
        }

        Ok(Self {
            search: Arc::new(search),
        })
    }
}
