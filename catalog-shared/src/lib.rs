//! # Catalog Shared
//!
//! Types shared between the search repository and the HTTP API: the catalog
//! item stored in the index, its derived suggestion terms, and the request
//! and response shapes of a filtered product search.

pub mod item;
pub mod search;

pub use item::{CatalogItem, CompletionField};
pub use search::{ProductSearchQuery, SearchPage, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
