//! In-process test harness: the real router over an in-memory engine.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt as _;

use catalog_api::{create_router, AppState};
use catalog_repository::{
    BatchOperationResult, BatchOperationSummary, SearchHits, SearchIndexClient, SearchIndexConfig,
    SearchIndexError, SearchIndexProvider,
};
use catalog_shared::{CatalogItem, ProductSearchQuery};

/// A toy engine with just enough behavior to drive the handlers.
///
/// Suggestions are case-insensitive prefix matches over `nameSuggest`
/// inputs, one option per document. Searches match on shared lowercase
/// name tokens and sort by ascending price.
#[derive(Default)]
pub struct InMemoryEngine {
    documents: Mutex<Vec<CatalogItem>>,
    down: AtomicBool,
    omit_channel: AtomicBool,
    failing_ids: Mutex<HashSet<i64>>,
    search_requests: AtomicUsize,
}

#[derive(Clone, Default)]
pub struct EngineHandle(pub Arc<InMemoryEngine>);

impl EngineHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_down(&self, down: bool) {
        self.0.down.store(down, Ordering::SeqCst);
    }

    pub fn omit_suggest_channel(&self) {
        self.0.omit_channel.store(true, Ordering::SeqCst);
    }

    pub fn fail_id(&self, id: i64) {
        self.0.failing_ids.lock().unwrap().insert(id);
    }

    pub fn documents(&self) -> Vec<CatalogItem> {
        self.0.documents.lock().unwrap().clone()
    }

    pub fn search_requests(&self) -> usize {
        self.0.search_requests.load(Ordering::SeqCst)
    }

    fn check_up(&self) -> Result<(), SearchIndexError> {
        if self.0.down.load(Ordering::SeqCst) {
            return Err(SearchIndexError::connection("connection refused"));
        }
        Ok(())
    }

    fn store(&self, item: &CatalogItem) {
        let mut docs = self.0.documents.lock().unwrap();
        docs.retain(|doc| doc.id != item.id);
        docs.push(item.clone());
    }
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}

#[async_trait]
impl SearchIndexProvider for EngineHandle {
    async fn ping(&self) -> Result<bool, SearchIndexError> {
        self.check_up()?;
        Ok(true)
    }

    async fn ensure_index_exists(&self) -> Result<(), SearchIndexError> {
        self.check_up()
    }

    async fn index_document(&self, item: &CatalogItem) -> Result<(), SearchIndexError> {
        self.check_up()?;
        if self.0.failing_ids.lock().unwrap().contains(&item.id) {
            return Err(SearchIndexError::index(
                "status 400: mapper_parsing_exception: failed to parse",
            ));
        }
        self.store(item);
        Ok(())
    }

    async fn bulk_index_documents(
        &self,
        items: &[CatalogItem],
    ) -> Result<BatchOperationSummary, SearchIndexError> {
        self.check_up()?;
        let failing = self.0.failing_ids.lock().unwrap().clone();

        let results = items
            .iter()
            .map(|item| {
                if failing.contains(&item.id) {
                    BatchOperationResult::failed(
                        item.id,
                        "mapper_parsing_exception: failed to parse",
                    )
                } else {
                    self.store(item);
                    BatchOperationResult::succeeded(item.id)
                }
            })
            .collect();

        Ok(BatchOperationSummary::from_results(results))
    }

    async fn suggest(&self, prefix: &str) -> Result<Option<Vec<String>>, SearchIndexError> {
        self.check_up()?;
        if self.0.omit_channel.load(Ordering::SeqCst) {
            return Ok(None);
        }

        let prefix = prefix.to_lowercase();
        let docs = self.0.documents.lock().unwrap();
        let options = docs
            .iter()
            .filter_map(|doc| {
                doc.name_suggest
                    .input
                    .iter()
                    .find(|input| input.to_lowercase().starts_with(&prefix))
                    .cloned()
            })
            .collect();

        Ok(Some(options))
    }

    async fn search(
        &self,
        query: &ProductSearchQuery,
        names: &[String],
    ) -> Result<SearchHits, SearchIndexError> {
        self.check_up()?;
        self.0.search_requests.fetch_add(1, Ordering::SeqCst);

        let wanted: HashSet<String> = names.iter().flat_map(|name| tokens(name)).collect();
        let docs = self.0.documents.lock().unwrap();

        let mut matched: Vec<CatalogItem> = docs
            .iter()
            .filter(|doc| tokens(&doc.name).any(|token| wanted.contains(&token)))
            .filter(|doc| query.max_price.map_or(true, |max| doc.price <= max))
            .cloned()
            .collect();
        matched.sort_by(|a, b| a.price.total_cmp(&b.price));

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.page_size as usize)
            .collect();

        Ok(SearchHits { total, items })
    }
}

pub struct TestApp {
    pub router: Router,
    pub engine: EngineHandle,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(SearchIndexConfig::default())
    }

    pub fn with_config(config: SearchIndexConfig) -> Self {
        let engine = EngineHandle::new();
        let client = SearchIndexClient::with_config(Box::new(engine.clone()), config);
        let router = create_router(AppState::new(Arc::new(client)));
        Self { router, engine }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body.to_string())).await
    }

    pub async fn post_raw(&self, uri: &str, body: &str) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body.to_string())).await
    }

    async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<String>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(match body {
                Some(body) => Body::from(body),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, value)
    }

    pub async fn insert(&self, id: i64, name: &str, price: f64) {
        let body = serde_json::json!({"id": id, "name": name, "price": price});
        let (status, _) = self.post("/products", body).await;
        assert_eq!(status, StatusCode::OK);
    }
}
