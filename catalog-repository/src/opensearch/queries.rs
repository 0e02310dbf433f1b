//! OpenSearch query builders.
//!
//! This module provides functions to build the completion-suggest request and
//! the filtered, price-sorted product search.

use serde_json::{json, Value};

use catalog_shared::ProductSearchQuery;

/// Name under which the completion suggestions are requested and returned.
pub const SUGGESTION_NAME: &str = "name-suggest";

/// The completion field holding the suggestion terms.
const SUGGEST_FIELD: &str = "nameSuggest";

/// Build a completion-suggest request for `prefix`.
///
/// AUTO fuzziness allows variable edits based on prefix length:
/// 1-2 chars: 0 edits, 3-5 chars: 1 edit, 6+ chars: 2 edits
///
/// `size` is 0 so the engine returns suggestions without search hits.
pub fn build_suggest_query(prefix: &str) -> Value {
    json!({
        "size": 0,
        "suggest": {
            SUGGESTION_NAME: {
                "prefix": prefix,
                "completion": {
                    "field": SUGGEST_FIELD,
                    "fuzzy": {
                        "fuzziness": "AUTO"
                    }
                }
            }
        }
    })
}

/// Build the paginated product search.
///
/// Each suggested name becomes an optional `match` clause on `name`, and at
/// least one must match. The price ceiling is a non-scoring filter. Results
/// are ordered by ascending price only.
///
/// With no names there is nothing that could match, so the query is
/// `match_none` instead of a `bool` with an empty `should` list.
pub fn build_search_query(query: &ProductSearchQuery, names: &[String]) -> Value {
    let mut body = json!({
        "from": query.offset(),
        "size": query.page_size,
        "track_total_hits": true,
        "sort": [
            { "price": { "order": "asc" } }
        ]
    });

    body["query"] = if names.is_empty() {
        json!({ "match_none": {} })
    } else {
        build_bool_query(names, query.max_price)
    };

    body
}

fn build_bool_query(names: &[String], max_price: Option<f64>) -> Value {
    let should: Vec<Value> = names
        .iter()
        .map(|name| json!({ "match": { "name": { "query": name } } }))
        .collect();

    let mut bool_query = json!({
        "should": should,
        "minimum_should_match": 1
    });

    if let Some(max_price) = max_price {
        bool_query["filter"] = json!([
            { "range": { "price": { "lte": max_price } } }
        ]);
    }

    json!({ "bool": bool_query })
}
