//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search index operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{BatchOperationSummary, SearchHits};
use catalog_shared::{CatalogItem, ProductSearchQuery};

/// Abstracts the underlying search index implementation (OpenSearch, Elasticsearch, etc.).
///
/// This trait defines the raw engine operations. Implementations are injected
/// into `SearchIndexClient`, which adds validation, suggestion-term
/// derivation and the two-phase search on top.
///
/// All methods return `Result<T, SearchIndexError>` for consistent error handling across
/// different backend implementations.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Probe the engine for liveness.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the engine answered with a success status
    /// * `Ok(false)` - If the engine answered with any other status
    /// * `Err(SearchIndexError)` - If the engine could not be reached
    async fn ping(&self) -> Result<bool, SearchIndexError>;

    /// Create the index with its mappings if it does not exist yet.
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError>;

    /// Index a single document keyed by its id.
    ///
    /// If a document with the same ID already exists, it will be replaced.
    /// The item is written as given; suggestion terms must already be derived.
    async fn index_document(&self, item: &CatalogItem) -> Result<(), SearchIndexError>;

    /// Index multiple documents in one bulk request.
    ///
    /// # Returns
    ///
    /// * `Ok(BatchOperationSummary)` - Per-item results in submission order
    /// * `Err(SearchIndexError)` - If the bulk request fails entirely
    async fn bulk_index_documents(
        &self,
        items: &[CatalogItem],
    ) -> Result<BatchOperationSummary, SearchIndexError>;

    /// Ask the completion suggester for fuzzy prefix completions.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(texts))` - Option texts in engine order, duplicates included
    /// * `Ok(None)` - If the response carried no suggestion channel at all
    /// * `Err(SearchIndexError)` - If the request fails
    async fn suggest(&self, prefix: &str) -> Result<Option<Vec<String>>, SearchIndexError>;

    /// Find items whose name matches at least one of `names`, optionally
    /// capped by price, sorted by ascending price and paginated per `query`.
    async fn search(
        &self,
        query: &ProductSearchQuery,
        names: &[String],
    ) -> Result<SearchHits, SearchIndexError>;
}
