//! OpenSearch implementation of the search index provider.
//!
//! This module provides a concrete implementation of `SearchIndexProvider`
//! using OpenSearch as the backend. The same REST calls work against
//! Elasticsearch clusters.

mod client;
mod index_config;
mod queries;
mod responses;

pub use client::OpenSearchClient;
pub use index_config::{get_index_settings, IndexConfig, DEFAULT_INDEX_NAME};
pub use queries::{build_search_query, build_suggest_query, SUGGESTION_NAME};
