//! Request and response types for search index operations.

use catalog_shared::CatalogItem;

/// Result of a batch operation for a single item.
///
/// This struct represents the outcome of indexing one document within a bulk
/// request. It indicates whether the operation succeeded and includes the
/// engine's error if it failed.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOperationResult {
    /// The item's identifier.
    pub id: i64,
    /// Whether the operation succeeded.
    pub success: bool,
    /// Engine error if the operation failed.
    pub error: Option<String>,
}

impl BatchOperationResult {
    pub fn succeeded(id: i64) -> Self {
        Self {
            id,
            success: true,
            error: None,
        }
    }

    pub fn failed(id: i64, error: impl Into<String>) -> Self {
        Self {
            id,
            success: false,
            error: Some(error.into()),
        }
    }
}

/// Summary of a batch operation containing aggregate statistics and individual results.
///
/// Results are in the order the items were submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchOperationSummary {
    /// Total number of items in the batch.
    pub total: usize,
    /// Number of successful operations.
    pub succeeded: usize,
    /// Number of failed operations.
    pub failed: usize,
    /// Individual results for each item.
    pub results: Vec<BatchOperationResult>,
}

impl BatchOperationSummary {
    /// Build a summary from per-item results.
    pub fn from_results(results: Vec<BatchOperationResult>) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            total: results.len(),
            succeeded,
            failed: results.len() - succeeded,
            results,
        }
    }

    /// Whether any item failed.
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// The failed results, in submission order.
    pub fn failures(&self) -> impl Iterator<Item = &BatchOperationResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

/// Outcome of a bulk insert: the items as written plus per-item results.
#[derive(Debug, Clone)]
pub struct BulkInsertReport {
    pub items: Vec<CatalogItem>,
    pub summary: BatchOperationSummary,
}

/// One page of matching documents and the total match count.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchHits {
    /// Matches before pagination.
    pub total: u64,
    pub items: Vec<CatalogItem>,
}
