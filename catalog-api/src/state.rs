//! Shared request state.

use std::sync::Arc;

use catalog_repository::SearchIndexClient;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchIndexClient>,
}

impl AppState {
    pub fn new(search: Arc<SearchIndexClient>) -> Self {
        Self { search }
    }
}
