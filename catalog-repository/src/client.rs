//! Search index client implementation.
//!
//! This module provides the main client for interacting with the catalog
//! index. Request handlers use it to check the engine, write items and run
//! suggestions and searches.

use std::collections::HashSet;

use tracing::{debug, instrument, warn};

use crate::config::SearchIndexConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::types::{BatchOperationSummary, BulkInsertReport};
use catalog_shared::{CatalogItem, ProductSearchQuery, SearchPage};

/// The main client for interacting with the catalog index.
///
/// Derives suggestion terms before every write, validates input before it
/// reaches the engine, and combines suggestion and search into the two-phase
/// product search.
pub struct SearchIndexClient {
    provider: Box<dyn SearchIndexProvider>,
    config: SearchIndexConfig,
}

impl SearchIndexClient {
    /// Create a new SearchIndexClient with default configuration.
    pub fn new(provider: Box<dyn SearchIndexProvider>) -> Self {
        Self {
            provider,
            config: SearchIndexConfig::default(),
        }
    }

    /// Create a new SearchIndexClient with custom configuration.
    pub fn with_config(provider: Box<dyn SearchIndexProvider>, config: SearchIndexConfig) -> Self {
        Self { provider, config }
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), SearchIndexError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(SearchIndexError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Prices must be finite and non-negative.
    fn validate_price(item: &CatalogItem) -> Result<(), SearchIndexError> {
        if !item.price.is_finite() || item.price < 0.0 {
            return Err(SearchIndexError::validation(format!(
                "item {}: price must be a non-negative number",
                item.id
            )));
        }
        Ok(())
    }

    /// Whether the engine answers a ping.
    ///
    /// Unreachable and unhealthy are both reported as `false`.
    pub async fn health_check(&self) -> bool {
        match self.provider.ping().await {
            Ok(true) => true,
            Ok(false) => {
                warn!("Engine ping returned a non-success status");
                false
            }
            Err(e) => {
                warn!(error = %e, "Engine ping failed");
                false
            }
        }
    }

    /// Create the index with its mappings if it is missing.
    pub async fn ensure_index(&self) -> Result<(), SearchIndexError> {
        self.provider.ensure_index_exists().await
    }

    /// Write one item, replacing any item with the same id.
    /// Input: CatalogItem (suggestion terms are overwritten with `[name]`)
    /// Output: Result<CatalogItem, SearchIndexError> (the item as stored)
    #[instrument(skip(self, item), fields(id = item.id))]
    pub async fn insert(&self, item: CatalogItem) -> Result<CatalogItem, SearchIndexError> {
        Self::validate_price(&item)?;
        let item = item.with_single_suggestion();
        self.provider.index_document(&item).await?;
        Ok(item)
    }

    /// Write many items in one bulk request.
    /// Input: Vec<CatalogItem> (suggestion terms are overwritten with the
    /// name's words followed by the whole name)
    /// Output: Result<BulkInsertReport, SearchIndexError>
    ///
    /// Note: per-item failures are reported in the summary. Items that were
    /// written stay written.
    ///
    /// The batch size is limited by the configured max_batch_size (default: 1000).
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub async fn bulk_insert(
        &self,
        items: Vec<CatalogItem>,
    ) -> Result<BulkInsertReport, SearchIndexError> {
        if items.is_empty() {
            return Ok(BulkInsertReport {
                items,
                summary: BatchOperationSummary::default(),
            });
        }

        self.validate_batch_size(items.len())?;
        items.iter().try_for_each(Self::validate_price)?;

        let items: Vec<CatalogItem> = items
            .into_iter()
            .map(CatalogItem::with_tokenized_suggestion)
            .collect();

        let summary = self.provider.bulk_index_documents(&items).await?;
        Ok(BulkInsertReport { items, summary })
    }

    /// Search products by fuzzy name prefix.
    /// Input: ProductSearchQuery (name, 1-based page, page size, optional max price)
    /// Output: Result<SearchPage, SearchIndexError> (ordered by ascending price)
    ///
    /// The name is first sent to the completion suggester; the suggested
    /// names then drive the paginated search. No suggestions means no
    /// matches, and the second request is skipped.
    #[instrument(
        skip(self, query),
        fields(name = %query.name, page = query.page, page_size = query.page_size)
    )]
    pub async fn search(&self, query: ProductSearchQuery) -> Result<SearchPage, SearchIndexError> {
        if query.name.trim().is_empty() {
            return Err(SearchIndexError::validation("name is required"));
        }
        if query.page == 0 {
            return Err(SearchIndexError::validation("page must be at least 1"));
        }
        if query.page_size == 0 {
            return Err(SearchIndexError::validation("pageSize must be at least 1"));
        }
        if let Some(max_price) = query.max_price {
            if !max_price.is_finite() {
                return Err(SearchIndexError::validation(
                    "maxPrice must be a finite number",
                ));
            }
        }

        let names = self
            .provider
            .suggest(&query.name)
            .await?
            .unwrap_or_default();

        if names.is_empty() {
            debug!("No suggestions, returning empty page");
            return Ok(SearchPage::empty(&query));
        }

        let hits = self.provider.search(&query, &names).await?;

        Ok(SearchPage {
            total: hits.total,
            page: query.page,
            page_size: query.page_size,
            items: hits.items,
        })
    }

    /// Autocomplete a prefix.
    /// Input: prefix
    /// Output: Result<Vec<String>, SearchIndexError> (distinct suggestions in
    /// order of first occurrence; empty if the engine returned no channel)
    #[instrument(skip(self))]
    pub async fn suggest(&self, prefix: &str) -> Result<Vec<String>, SearchIndexError> {
        if prefix.trim().is_empty() {
            return Err(SearchIndexError::validation("prefix is required"));
        }

        let Some(texts) = self.provider.suggest(prefix).await? else {
            return Ok(Vec::new());
        };

        let mut seen = HashSet::new();
        Ok(texts
            .into_iter()
            .filter(|text| seen.insert(text.clone()))
            .collect())
    }
}
