//! Typed shapes of the engine responses this client reads.

use serde::Deserialize;

use crate::types::{BatchOperationResult, SearchHits};
use catalog_shared::CatalogItem;

/// Error object the engine attaches to failed requests and bulk items.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct EngineError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub reason: Option<String>,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {}", self.kind, reason),
            None => write!(f, "{}", self.kind),
        }
    }
}

/// Body of a non-success response.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: EngineError,
}

/// Summarize an error response body as `type: reason`.
///
/// Falls back to an empty string for bodies that are not engine errors.
pub(crate) fn summarize_error_body(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|r| r.error.to_string())
        .unwrap_or_default()
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestResponse {
    #[serde(default)]
    pub suggest: Option<SuggestChannels>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestChannels {
    #[serde(rename = "name-suggest", default)]
    pub name_suggest: Option<Vec<SuggestEntry>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestEntry {
    #[serde(default)]
    pub options: Vec<SuggestOption>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SuggestOption {
    pub text: String,
}

impl SuggestResponse {
    /// Option texts in engine order, or `None` if the channel is absent.
    pub fn into_option_texts(self) -> Option<Vec<String>> {
        let entries = self.suggest?.name_suggest?;
        Some(
            entries
                .into_iter()
                .flat_map(|entry| entry.options)
                .map(|option| option.text)
                .collect(),
        )
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    pub hits: Hits,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Hits {
    #[serde(default)]
    pub total: Option<TotalHits>,
    #[serde(default)]
    pub hits: Vec<Hit>,
}

/// `hits.total` is an object on current clusters and a bare count on old ones.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum TotalHits {
    Object { value: u64 },
    Count(u64),
}

impl TotalHits {
    fn value(&self) -> u64 {
        match self {
            Self::Object { value } => *value,
            Self::Count(count) => *count,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Hit {
    #[serde(rename = "_source")]
    pub source: CatalogItem,
}

impl From<SearchResponse> for SearchHits {
    fn from(response: SearchResponse) -> Self {
        let items: Vec<CatalogItem> = response
            .hits
            .hits
            .into_iter()
            .map(|h| h.source)
            .collect();
        let total = response
            .hits
            .total
            .map(|t| t.value())
            .unwrap_or(items.len() as u64);
        SearchHits { total, items }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponse {
    pub errors: bool,
    #[serde(default)]
    pub items: Vec<BulkResponseItem>,
}

/// One entry of `items`; only `index` actions are issued.
#[derive(Debug, Deserialize)]
pub(crate) struct BulkResponseItem {
    #[serde(default)]
    pub index: Option<BulkItemStatus>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BulkItemStatus {
    pub status: u16,
    #[serde(default)]
    pub error: Option<EngineError>,
}

impl BulkResponse {
    /// Pair per-item statuses with the submitted items, in order.
    ///
    /// An item the engine did not report on counts as failed.
    pub fn into_results(self, submitted: &[CatalogItem]) -> Vec<BatchOperationResult> {
        let mut statuses = self.items.into_iter().map(|item| item.index);

        submitted
            .iter()
            .map(|item| match statuses.next().flatten() {
                Some(BulkItemStatus {
                    error: Some(error), ..
                }) => BatchOperationResult::failed(item.id, error.to_string()),
                Some(status) if (200..300).contains(&status.status) => {
                    BatchOperationResult::succeeded(item.id)
                }
                Some(status) => {
                    BatchOperationResult::failed(item.id, format!("status {}", status.status))
                }
                None => BatchOperationResult::failed(item.id, "no result reported for item"),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> T {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_suggest_channel_missing() {
        let response: SuggestResponse = parse(json!({ "took": 1, "hits": { "hits": [] } }));
        assert!(response.into_option_texts().is_none());

        let response: SuggestResponse = parse(json!({ "suggest": {} }));
        assert!(response.into_option_texts().is_none());
    }

    #[test]
    fn test_suggest_channel_present_but_empty() {
        let response: SuggestResponse = parse(json!({
            "suggest": {
                "name-suggest": [
                    { "text": "zzz", "offset": 0, "length": 3, "options": [] }
                ]
            }
        }));
        assert_eq!(response.into_option_texts(), Some(vec![]));
    }

    #[test]
    fn test_suggest_options_in_order() {
        let response: SuggestResponse = parse(json!({
            "suggest": {
                "name-suggest": [
                    {
                        "text": "red",
                        "offset": 0,
                        "length": 3,
                        "options": [
                            { "text": "Red Shoes", "_id": "1", "_score": 1.0 },
                            { "text": "Red Hat", "_id": "2", "_score": 1.0 },
                            { "text": "Red Shoes", "_id": "3", "_score": 1.0 }
                        ]
                    }
                ]
            }
        }));

        assert_eq!(
            response.into_option_texts().unwrap(),
            vec!["Red Shoes", "Red Hat", "Red Shoes"]
        );
    }

    #[test]
    fn test_search_hits() {
        let response: SearchResponse = parse(json!({
            "hits": {
                "total": { "value": 12, "relation": "eq" },
                "hits": [
                    {
                        "_id": "2",
                        "_score": null,
                        "_source": { "id": 2, "name": "Red Hat", "price": 10.0 },
                        "sort": [10.0]
                    }
                ]
            }
        }));

        let hits = SearchHits::from(response);
        assert_eq!(hits.total, 12);
        assert_eq!(hits.items.len(), 1);
        assert_eq!(hits.items[0].id, 2);
        assert_eq!(hits.items[0].name, "Red Hat");
    }

    #[test]
    fn test_search_hits_legacy_total() {
        let response: SearchResponse = parse(json!({ "hits": { "total": 3, "hits": [] } }));
        assert_eq!(SearchHits::from(response).total, 3);
    }

    #[test]
    fn test_bulk_results() {
        let response: BulkResponse = parse(json!({
            "took": 5,
            "errors": true,
            "items": [
                { "index": { "_id": "1", "status": 201, "result": "created" } },
                {
                    "index": {
                        "_id": "2",
                        "status": 400,
                        "error": {
                            "type": "mapper_parsing_exception",
                            "reason": "failed to parse field [price]"
                        }
                    }
                },
                { "index": { "_id": "3", "status": 200, "result": "updated" } }
            ]
        }));

        let submitted = vec![
            CatalogItem::new(1, "A", 1.0),
            CatalogItem::new(2, "B", 2.0),
            CatalogItem::new(3, "C", 3.0),
        ];
        let results = response.into_results(&submitted);

        assert_eq!(results.len(), 3);
        assert!(results[0].success);
        assert!(!results[1].success);
        assert_eq!(results[1].id, 2);
        assert_eq!(
            results[1].error.as_deref(),
            Some("mapper_parsing_exception: failed to parse field [price]")
        );
        assert!(results[2].success);
    }

    #[test]
    fn test_bulk_results_missing_item() {
        let response: BulkResponse = parse(json!({ "errors": false, "items": [] }));
        let results = response.into_results(&[CatalogItem::new(9, "X", 1.0)]);
        assert!(!results[0].success);
    }

    #[test]
    fn test_summarize_error_body() {
        let body = r#"{"error":{"type":"index_not_found_exception","reason":"no such index [products]"},"status":404}"#;
        assert_eq!(
            summarize_error_body(body),
            "index_not_found_exception: no such index [products]"
        );
        assert_eq!(summarize_error_body("not json"), "");
    }
}
