//! API layer: routes and handlers.

pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Upper bound on request bodies; a full bulk batch fits well below it.
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/test", get(handlers::health::engine_status))
        .route("/products", post(handlers::products::insert_product))
        .route(
            "/products/bulk",
            post(handlers::products::bulk_insert_products),
        )
        .route("/products/search", get(handlers::search::search_products))
        .route("/products/suggest", get(handlers::search::suggest_products))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}
