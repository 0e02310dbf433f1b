//! # Catalog Repository
//!
//! This crate provides the search-engine side of the product catalog: error
//! types, the `SearchIndexProvider` interface, the `SearchIndexClient` used
//! by request handlers, and a concrete implementation for OpenSearch (which
//! also speaks to Elasticsearch-compatible clusters).

pub mod client;
pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use self::opensearch::{IndexConfig, OpenSearchClient};
pub use client::SearchIndexClient;
pub use config::{ConnectionConfig, Credentials, SearchIndexConfig};
pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use types::{BatchOperationResult, BatchOperationSummary, BulkInsertReport, SearchHits};
