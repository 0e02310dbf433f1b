//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchIndexProvider`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials as TransportCredentials,
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesExistsParts},
    params::Refresh,
    BulkParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};
use url::Url;

use crate::config::ConnectionConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::opensearch::queries::{build_search_query, build_suggest_query};
use crate::opensearch::responses::{
    summarize_error_body, BulkResponse, SearchResponse, SuggestResponse,
};
use crate::types::{BatchOperationSummary, SearchHits};
use catalog_shared::{CatalogItem, ProductSearchQuery};

/// OpenSearch client implementation.
///
/// Holds one transport for the process lifetime. The transport is safe to
/// share between concurrent requests.
///
/// # Example
///
/// ```ignore
/// use catalog_repository::{ConnectionConfig, Credentials, IndexConfig, OpenSearchClient};
///
/// let connection = ConnectionConfig::new("http://localhost:9200")
///     .with_credentials(Credentials::new("elastic", "changeme"));
/// let client = OpenSearchClient::new(&connection, IndexConfig::new("products"))?;
///
/// let item = CatalogItem::new(1, "Red Shoes", 20.0).with_single_suggestion();
/// client.index_document(&item).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
    debug_responses: bool,
    refresh_on_write: bool,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the configured engine.
    ///
    /// No request is sent; a malformed URL or transport setup fails here.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchIndexError)` - If connection setup fails
    pub fn new(
        connection: &ConnectionConfig,
        index_config: IndexConfig,
    ) -> Result<Self, SearchIndexError> {
        let parsed_url = Url::parse(&connection.url).map_err(|e| {
            SearchIndexError::connection(format!("Invalid URL {}: {}", connection.url, e))
        })?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(connection.request_timeout);

        if let Some(credentials) = &connection.credentials {
            builder = builder.auth(TransportCredentials::Basic(
                credentials.username.clone(),
                credentials.password.clone(),
            ));
        }

        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %connection.url,
            index = %index_config.name,
            authenticated = connection.credentials.is_some(),
            timeout_ms = connection.request_timeout.as_millis() as u64,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
            debug_responses: connection.debug_responses,
            refresh_on_write: connection.refresh_on_write,
        })
    }

    /// Describe a non-success response for an error message.
    ///
    /// With `debug_responses` the raw body is kept; otherwise only the
    /// engine's error type and reason.
    async fn failure_diagnostic(&self, response: Response) -> String {
        let status = response.status_code();
        let body = response.text().await.unwrap_or_default();

        let detail = if self.debug_responses {
            body
        } else {
            summarize_error_body(&body)
        };

        if detail.is_empty() {
            format!("status {}", status)
        } else {
            format!("status {}: {}", status, detail)
        }
    }

    fn log_request_body(&self, operation: &str, body: &Value) {
        if self.debug_responses {
            debug!(operation = operation, body = %body, "Sending request");
        }
    }

    fn refresh(&self) -> Refresh {
        if self.refresh_on_write {
            Refresh::WaitFor
        } else {
            Refresh::False
        }
    }

    async fn send_search(
        &self,
        operation: &str,
        body: Value,
    ) -> Result<Response, SearchIndexError> {
        self.log_request_body(operation, &body);

        let response = self
            .client
            .search(SearchParts::Index(&[&self.index_config.name]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            let diagnostic = self.failure_diagnostic(response).await;
            error!(operation = operation, diagnostic = %diagnostic, "Search request failed");
            return Err(SearchIndexError::query(diagnostic));
        }

        Ok(response)
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchClient {
    async fn ping(&self) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        debug!(status = %status, "Ping response");
        Ok(status.is_success())
    }

    /// Create the catalog index with its mappings unless it already exists.
    ///
    /// A concurrent creation by another instance is treated as success.
    #[instrument(skip(self), fields(index = %self.index_config.name))]
    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        let exists = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[&self.index_config.name]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = exists.status_code();
        if status.is_success() {
            debug!("Index already exists");
            return Ok(());
        }
        if status.as_u16() != 404 {
            let diagnostic = self.failure_diagnostic(exists).await;
            return Err(SearchIndexError::index_creation(diagnostic));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_config.name))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            let diagnostic = self.failure_diagnostic(response).await;
            if diagnostic.contains("resource_already_exists_exception") {
                debug!("Index was created concurrently");
                return Ok(());
            }
            error!(diagnostic = %diagnostic, "Index creation failed");
            return Err(SearchIndexError::index_creation(diagnostic));
        }

        info!("Created index");
        Ok(())
    }

    /// Index one document under its id, replacing any previous version.
    #[instrument(skip(self, item), fields(id = item.id))]
    async fn index_document(&self, item: &CatalogItem) -> Result<(), SearchIndexError> {
        let doc_id = item.document_id();

        let response = self
            .client
            .index(IndexParts::IndexId(&self.index_config.name, &doc_id))
            .refresh(self.refresh())
            .body(item)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            let diagnostic = self.failure_diagnostic(response).await;
            error!(diagnostic = %diagnostic, "Index request failed");
            return Err(SearchIndexError::index(diagnostic));
        }

        debug!(doc_id = %doc_id, "Document indexed");
        Ok(())
    }

    /// Index all items with a single `_bulk` request.
    ///
    /// Per-item failures are reported in the summary, not as an error. Items
    /// that succeeded stay indexed.
    #[instrument(skip(self, items), fields(count = items.len()))]
    async fn bulk_index_documents(
        &self,
        items: &[CatalogItem],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(items.len() * 2);

        for item in items {
            let action = json!({
                "index": { "_index": self.index_config.name, "_id": item.document_id() }
            });
            body.push(action.into());
            body.push(
                serde_json::to_value(item)
                    .map_err(|e| SearchIndexError::bulk_operation(e.to_string()))?
                    .into(),
            );
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.name))
            .refresh(self.refresh())
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            let diagnostic = self.failure_diagnostic(response).await;
            error!(diagnostic = %diagnostic, "Bulk request failed");
            return Err(SearchIndexError::bulk_operation(diagnostic));
        }

        let bulk: BulkResponse = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(format!("Invalid bulk response: {}", e)))?;

        if bulk.errors {
            warn!("Bulk response reported item errors");
        }

        let summary = BatchOperationSummary::from_results(bulk.into_results(items));
        debug!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );
        Ok(summary)
    }

    #[instrument(skip(self))]
    async fn suggest(&self, prefix: &str) -> Result<Option<Vec<String>>, SearchIndexError> {
        let body = build_suggest_query(prefix);
        let response = self.send_search("suggest", body).await?;

        let parsed: SuggestResponse = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(format!("Invalid suggest response: {}", e)))?;

        let texts = parsed.into_option_texts();
        debug!(
            channel_present = texts.is_some(),
            count = texts.as_ref().map_or(0, Vec::len),
            "Suggestions received"
        );
        Ok(texts)
    }

    #[instrument(
        skip(self, query, names),
        fields(page = query.page, page_size = query.page_size, names = names.len())
    )]
    async fn search(
        &self,
        query: &ProductSearchQuery,
        names: &[String],
    ) -> Result<SearchHits, SearchIndexError> {
        let body = build_search_query(query, names);
        let response = self.send_search("search", body).await?;

        let parsed: SearchResponse = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(format!("Invalid search response: {}", e)))?;

        let hits = SearchHits::from(parsed);
        debug!(
            total = hits.total,
            returned = hits.items.len(),
            "Search completed"
        );
        Ok(hits)
    }
}
