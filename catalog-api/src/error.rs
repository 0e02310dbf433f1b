//! HTTP error type for the catalog API.
//!
//! Every error is rendered as an `application/problem+json` body.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use catalog_repository::SearchIndexError;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("engine is down")]
    EngineDown,

    #[error("Some items failed to index")]
    PartialBulkFailure { failed: usize, total: usize },

    #[error(transparent)]
    Search(#[from] SearchIndexError),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::EngineDown => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::PartialBulkFailure { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Search(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Search(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::PartialBulkFailure { failed, total } => {
                format!("{} of {} items failed to index", failed, total)
            }
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "Request failed: {}", self);
        }

        let title = match &self {
            ApiError::EngineDown | ApiError::PartialBulkFailure { .. } => self.to_string(),
            _ => status.canonical_reason().unwrap_or("Error").to_string(),
        };

        let body = Json(json!({
            "type": "about:blank",
            "title": title,
            "status": status.as_u16(),
            "detail": self.detail(),
        }));

        let mut response = (status, body).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}
