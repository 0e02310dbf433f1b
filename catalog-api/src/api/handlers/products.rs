//! Write handlers: single and bulk insert.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::{error, info};

use crate::error::{ApiError, Result};
use crate::state::AppState;
use catalog_shared::CatalogItem;

/// Index one product and echo it back with its suggestion terms.
pub async fn insert_product(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CatalogItem>, JsonRejection>,
) -> Result<Json<CatalogItem>> {
    let Json(item) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let stored = state.search.insert(item).await?;
    info!(id = stored.id, "Product indexed");
    Ok(Json(stored))
}

/// Index a batch of products in one request.
///
/// Any per-item failure is logged with the item's id and turned into a
/// single aggregate error; items that succeeded stay indexed.
pub async fn bulk_insert_products(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Vec<CatalogItem>>, JsonRejection>,
) -> Result<Json<Vec<CatalogItem>>> {
    let Json(items) = payload.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

    let report = state.search.bulk_insert(items).await?;

    if report.summary.has_failures() {
        for failure in report.summary.failures() {
            error!(
                id = failure.id,
                error = failure.error.as_deref().unwrap_or("unknown error"),
                "Failed to index document"
            );
        }
        return Err(ApiError::PartialBulkFailure {
            failed: report.summary.failed,
            total: report.summary.total,
        });
    }

    info!(count = report.items.len(), "Bulk indexed products");
    Ok(Json(report.items))
}
