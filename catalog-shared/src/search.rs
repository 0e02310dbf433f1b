//! Filtered product search request and response types.

use serde::{Deserialize, Serialize};

use crate::item::CatalogItem;

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A paginated product search.
///
/// Pages are 1-based. `max_price`, when set, is an inclusive ceiling.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSearchQuery {
    pub name: String,
    pub page: u32,
    pub page_size: u32,
    pub max_price: Option<f64>,
}

impl ProductSearchQuery {
    /// Create a query for the first page with the default page size.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
            max_price: None,
        }
    }

    /// Set the page and page size.
    pub fn with_page(mut self, page: u32, page_size: u32) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Set the inclusive price ceiling.
    pub fn with_max_price(mut self, max_price: f64) -> Self {
        self.max_price = Some(max_price);
        self
    }

    /// Number of matches to skip: `(page - 1) * page_size`.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Matches before pagination.
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
    pub items: Vec<CatalogItem>,
}

impl SearchPage {
    /// An empty page for the given query.
    pub fn empty(query: &ProductSearchQuery) -> Self {
        Self {
            total: 0,
            page: query.page,
            page_size: query.page_size,
            items: Vec::new(),
        }
    }
}
