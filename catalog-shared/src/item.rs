//! The catalog item document.
//!
//! A `CatalogItem` is both the JSON body accepted by the API and the document
//! source stored in the search index. Field names are camelCase on the wire
//! and in the index mappings.

use serde::{Deserialize, Serialize};

/// Input terms for the engine's completion suggester.
///
/// Serializes as `{ "input": [...] }`, the shape a `completion` field expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionField {
    #[serde(default)]
    pub input: Vec<String>,
}

impl CompletionField {
    /// Create a completion field from the given input terms.
    pub fn new(input: Vec<String>) -> Self {
        Self { input }
    }
}

/// A product in the catalog.
///
/// `name_suggest` is derived from `name` before every write and is never
/// taken from the caller as-is; see [`CatalogItem::with_single_suggestion`]
/// and [`CatalogItem::with_tokenized_suggestion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Caller-assigned identifier, also used as the document `_id`.
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_suggest: CompletionField,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_active: bool,
}

impl CatalogItem {
    /// Create an item with the given id, name and price. Other fields are empty.
    pub fn new(id: i64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            name_suggest: CompletionField::default(),
            price,
            description: String::new(),
            category: String::new(),
            is_active: false,
        }
    }

    /// Document id used in the search index.
    pub fn document_id(&self) -> String {
        self.id.to_string()
    }

    /// Replace the suggestion terms with the whole name only.
    ///
    /// Used by single inserts.
    pub fn with_single_suggestion(mut self) -> Self {
        self.name_suggest = CompletionField::new(single_suggestion_terms(&self.name));
        self
    }

    /// Replace the suggestion terms with every word of the name followed by
    /// the whole name.
    ///
    /// Used by bulk inserts.
    pub fn with_tokenized_suggestion(mut self) -> Self {
        self.name_suggest = CompletionField::new(tokenized_suggestion_terms(&self.name));
        self
    }
}

/// Suggestion terms for a single insert: `[name]`.
pub fn single_suggestion_terms(name: &str) -> Vec<String> {
    vec![name.to_string()]
}

/// Suggestion terms for a bulk insert.
///
/// Whitespace-separated tokens of `name` (empty tokens dropped) followed by
/// the full `name`. Duplicates are kept, so a one-word name appears twice.
pub fn tokenized_suggestion_terms(name: &str) -> Vec<String> {
    name.split_whitespace()
        .map(str::to_string)
        .chain(std::iter::once(name.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_suggestion_is_name_only() {
        let item = CatalogItem::new(1, "Red Running Shoes", 20.0).with_single_suggestion();
        assert_eq!(
            item.name_suggest.input,
            vec!["Red Running Shoes".to_string()]
        );
    }

    #[test]
    fn test_tokenized_suggestion_tokens_then_name() {
        let item = CatalogItem::new(1, "Red Running Shoes", 20.0).with_tokenized_suggestion();
        assert_eq!(
            item.name_suggest.input,
            vec!["Red", "Running", "Shoes", "Red Running Shoes"]
        );
    }

    #[test]
    fn test_tokenized_suggestion_single_word_duplicates() {
        let terms = tokenized_suggestion_terms("Hat");
        assert_eq!(terms, vec!["Hat", "Hat"]);
    }

    #[test]
    fn test_tokenized_suggestion_drops_empty_tokens() {
        let terms = tokenized_suggestion_terms("  Red   Hat ");
        assert_eq!(terms.len(), 3);
        assert_eq!(terms[0], "Red");
        assert_eq!(terms[1], "Hat");
        // The full name is kept verbatim, surrounding spaces included
        assert_eq!(terms[2], "  Red   Hat ");
    }

    #[test]
    fn test_caller_supplied_suggestion_is_overwritten() {
        let mut item = CatalogItem::new(7, "Blue Mug", 4.5);
        item.name_suggest = CompletionField::new(vec!["bogus".to_string()]);

        let item = item.with_single_suggestion();
        assert_eq!(item.name_suggest.input, vec!["Blue Mug".to_string()]);
    }

    #[test]
    fn test_serializes_camel_case() {
        let mut item = CatalogItem::new(2, "Red Hat", 10.0).with_single_suggestion();
        item.is_active = true;
        item.category = "apparel".to_string();

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["id"], 2);
        assert_eq!(value["nameSuggest"]["input"], json!(["Red Hat"]));
        assert_eq!(value["isActive"], true);
        assert_eq!(value["category"], "apparel");
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let item: CatalogItem = serde_json::from_value(json!({
            "id": 3,
            "name": "Lamp",
            "price": 12.5
        }))
        .unwrap();

        assert_eq!(item.id, 3);
        assert_eq!(item.description, "");
        assert!(!item.is_active);
        assert!(item.name_suggest.input.is_empty());
    }

    #[test]
    fn test_missing_id_is_rejected() {
        let result: Result<CatalogItem, _> = serde_json::from_value(json!({ "name": "Lamp" }));
        assert!(result.is_err());
    }
}
