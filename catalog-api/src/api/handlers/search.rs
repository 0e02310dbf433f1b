//! Read handlers: filtered search and autocomplete.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::{ApiError, Result};
use crate::state::AppState;
use catalog_shared::{ProductSearchQuery, SearchPage, DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub name: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub max_price: Option<f64>,
}

impl SearchParams {
    fn into_query(self) -> Result<ProductSearchQuery> {
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::bad_request("name is required"))?;

        let mut query = ProductSearchQuery::new(name).with_page(
            self.page.unwrap_or(DEFAULT_PAGE),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        );
        if let Some(max_price) = self.max_price {
            if !max_price.is_finite() {
                return Err(ApiError::bad_request("maxPrice must be a finite number"));
            }
            query = query.with_max_price(max_price);
        }
        Ok(query)
    }
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub prefix: Option<String>,
}

/// Search products whose names match suggestions for `name`, cheapest first.
pub async fn search_products(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<SearchPage>> {
    let Query(params) = params.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let query = params.into_query()?;

    let page = state.search.search(query).await?;
    Ok(Json(page))
}

/// Distinct completions for `prefix`.
pub async fn suggest_products(
    State(state): State<AppState>,
    params: std::result::Result<Query<SuggestParams>, QueryRejection>,
) -> Result<Json<Vec<String>>> {
    let Query(params) = params.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let prefix = params
        .prefix
        .filter(|prefix| !prefix.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("prefix is required"))?;

    let suggestions = state.search.suggest(&prefix).await?;
    Ok(Json(suggestions))
}
