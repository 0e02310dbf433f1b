use axum::{extract::State, Json};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Report whether the search engine answers a ping.
pub async fn engine_status(State(state): State<AppState>) -> Result<Json<&'static str>> {
    if state.search.health_check().await {
        Ok(Json("engine is up"))
    } else {
        Err(ApiError::EngineDown)
    }
}
